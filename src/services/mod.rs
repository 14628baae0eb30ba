// Collaborators of the pipelines and the service that drives them

pub mod coaching_service;
pub mod narrative_service;
pub mod storage_service;

pub use coaching_service::{CoachingService, PlanResponse};
pub use narrative_service::{
    narrative_generator_from_config, CannedNarrativeGenerator, GroqNarrativeGenerator,
    NarrativeGenerator, NarrativeRequest, ProviderError,
};
pub use storage_service::{StorageService, DEFAULT_LOG_LIMIT};
