//! Domain models for the admin service.

pub mod campaign;
pub mod registration;

pub use campaign::{
    CampaignDraft, CampaignStats, CampaignWithStats, EmailCampaign, StatsFailureKind, StatsOutcome,
};
pub use registration::EventRegistration;
