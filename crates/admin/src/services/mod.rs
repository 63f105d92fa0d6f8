//! Business-logic services for the admin panel.

pub mod campaigns;

pub use campaigns::CampaignService;
