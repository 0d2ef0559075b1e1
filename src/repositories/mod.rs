pub mod attempt_result_repository;

pub use attempt_result_repository::{
    AttemptResultRepository, InMemoryAttemptResultRepository, MongoAttemptResultRepository,
};
