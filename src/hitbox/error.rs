// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HitboxError {
    #[error("Unknown hitbox set: {0}")]
    UnknownSet(String),
    #[error("Skeleton changed since binding: bound {bound} bones, now {current}")]
    SkeletonChanged { bound: usize, current: usize },
    #[error("Bone matrix pool exhausted ({limit} buffers in use)")]
    PoolExhausted { limit: usize },
    #[error("Animation error: {0}")]
    Animation(#[source] anyhow::Error),
    #[error("Failed to draw hitbox {index}: {source}")]
    Draw {
        index: usize,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to load hitbox sets: {0}")]
    Load(#[from] serde_json::Error),
}

pub type Result<T, E = HitboxError> = std::result::Result<T, E>;
