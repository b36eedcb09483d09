mod bindings;
mod client;
mod convert;
mod semaphore;

pub use bindings::{GroupCreatedFilter, Semaphore, SemaphoreEvents};
pub use client::SemaphoreClient;
pub use convert::{proof_to_call, u256_to_word, word_to_u256, words_to_u256s};
pub use semaphore::{CreatedGroup, SemaphoreContract};

#[cfg(test)]
mod tests;
