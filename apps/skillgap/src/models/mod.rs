pub mod analysis;
pub mod assessment;
pub mod progress;
pub mod resource;
pub mod role;
pub mod roadmap;
pub mod user;

pub use analysis::{GapAnalysis, Priority, SkillGap};
pub use assessment::{Assessment, NewAssessment, SkillLevel, SkillRating};
pub use progress::{ProgressRecord, ProgressUpdate, SkillProgress};
pub use resource::Resource;
pub use role::{CareerRole, RequiredSkill};
pub use roadmap::{Roadmap, RoadmapItem};
pub use user::{AuthResponse, Credentials, Registration, UserProfile};
