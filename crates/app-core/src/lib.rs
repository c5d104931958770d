//! Core booking logic for Cosmic Voyage
//!
//! This crate contains the framework-agnostic booking workflow: input
//! validation, trip pricing, the booking draft, submission, login and the
//! user's booking history. Remote calls go through the collaborator traits
//! from `api-client`, so every flow here runs against test doubles as well
//! as the real service.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod draft;
pub mod history;
pub mod login;
pub mod outcome;
pub mod pricing;
pub mod submission;
pub mod validation;

pub use draft::{BookingDraft, ResolvedTrip};
pub use history::BookingHistory;
pub use login::{LoginFlow, LoginForm, LoginOutcome, LoginValidation};
pub use outcome::{BookingConfirmation, BookingOutcome, ErrorKind, DEFAULT_FAILURE_MESSAGE};
pub use pricing::{PricingEngine, PricingError};
pub use submission::{iso_departure, BookingSubmission, DateBuildError};
