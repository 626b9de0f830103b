//! Infrastructure layer: wire DTOs and the concrete session registry.

pub mod dto;
pub mod repository;
