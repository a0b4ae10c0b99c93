mod decryption_key;

pub use decryption_key::DecryptionKey;

#[cfg(test)]
mod tests;
