// ABOUTME: Generative AI service integration
// ABOUTME: Provider-neutral client contract and the Gemini implementation

pub mod gemini;
pub mod service;

pub use gemini::{GeminiClient, GenerationSettings, HarmCategory, SafetyThreshold};
pub use service::{
    AIResponse, AIServiceError, AIServiceResult, GenerationClient, GenerationRequest, Usage,
};
