pub mod completion_llm;
pub mod memory_repo;

pub use completion_llm::OpenAiCompletionAdapter;
pub use memory_repo::InMemoryProjectRepository;
