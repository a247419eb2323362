// Shell services
// Stateless decision logic: navigation policy, page message bridge, progress animation.

pub mod message_bridge;
pub mod navigation_policy;
pub mod progress;
