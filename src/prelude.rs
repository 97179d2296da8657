pub use crate::error::ModelError;
pub use crate::lstm::{
    Activation, DenseLayer, FeedForward, GateConfig, GateKind, GateParameters, HiddenLayers,
    LearningHyperParameters, LstmParameters, MomentumOptimizer, Network, NetworkConfig, State,
    StateHistory, WindowGradients,
};
pub use crate::math::argmax;
