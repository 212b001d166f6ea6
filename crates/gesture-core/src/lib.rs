//! SwipeDeck Gesture Core
//!
//! Turns a continuous pointer drag into a discrete decision about the
//! card on top of the discovery stack:
//! - **Sampler:** Tracks cumulative displacement for one touch interaction
//! - **Transform:** Maps displacement to card offset and tilt
//! - **Classifier:** Decides Left/Right/Up/Cancelled on release
//! - **Animator:** Springs committed cards off-screen, eases cancelled ones back
//! - **Queue:** Owns the cursor over the finite card list
//! - **Session:** Wires the above together and emits commit events
//! - **Replay:** Runs recorded touch traces through a session
//!
//! Everything here runs on a single thread. The only suspension point is
//! the completion animation between release and queue advance.

pub mod animator;
pub mod classifier;
pub mod queue;
pub mod replay;
pub mod sampler;
pub mod session;
pub mod sink;
pub mod transform;

pub use animator::{Animation, AnimationFrame, CompletionAnimator};
pub use classifier::{classify, OutcomeClassifier};
pub use queue::{CardQueue, QueueState, QueueTransition};
pub use replay::{replay, replay_realtime, ReplayReport};
pub use sampler::{GestureSampler, GestureState};
pub use session::{
    DiscoverySession, IgnoreReason, InputDisposition, Resolution, SessionFrame, SessionPhase,
};
pub use sink::CommitSink;
pub use transform::{map_to_transform, TransformMapper};
