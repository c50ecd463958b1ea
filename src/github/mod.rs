mod client;

pub use client::GithubClient;
