use actix_web::error::PayloadError;
use actix_web::web;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("failed to read request body: {0}")]
    Payload(#[from] PayloadError),
    #[error("request body exceeds {0} bytes")]
    TooLarge(usize),
}

/// Buffers the whole request body, refusing anything larger than `limit` bytes.
pub async fn read_body(mut payload: web::Payload, limit: usize) -> Result<Bytes, BodyError> {
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            return Err(BodyError::TooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body.freeze())
}
