pub mod analysis;
pub mod conversation;
pub mod geo;
pub mod symptom;

pub use analysis::{AnalysisResult, DrugLabel, MatchQuality};
pub use conversation::{ConversationMessage, Role};
pub use geo::{BoundingBox, Facility, FacilitySearch, GeoPoint};
pub use symptom::{Medicine, SymptomEntry};
