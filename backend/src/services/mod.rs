//! Business logic services

pub mod advice;
pub mod calculations;

pub use advice::{
    AdviceError, AdviceGenerator, AdviceService, DisabledAdviceGenerator, GeminiClient,
    FALLBACK_ADVICE,
};
pub use calculations::CalculationService;
