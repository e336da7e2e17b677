//! AWS Cognito user pool adapter
//!
//! Implements [`IdentityDirectory`](crate::adapters::directory::IdentityDirectory)
//! with `aws-sdk-cognitoidentityprovider`.

pub mod client;
pub mod models;

pub use client::CognitoDirectory;
