// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

//! Reusable scratch storage for per-frame bone matrices.
//!
//! Buffers are rented for the duration of a single update and handed back when
//! the [`PooledMatrices`] guard is dropped, whatever path the update takes.

use std::ops::{Deref, DerefMut};

use bevy::prelude::*;

use crate::hitbox::error::{HitboxError, Result};

#[derive(Resource, Debug, Default)]
pub struct BoneMatrixPool {
    free: Vec<Vec<Mat4>>,
    in_use: usize,
    limit: Option<usize>,
}

impl BoneMatrixPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool that refuses to hand out more than `limit` buffers at once.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..default()
        }
    }

    /// Rent a buffer of exactly `len` matrices.
    /// Contents are unspecified until the caller fills them.
    pub fn acquire(&mut self, len: usize) -> Result<PooledMatrices<'_>> {
        if let Some(limit) = self.limit
            && self.in_use >= limit
        {
            return Err(HitboxError::PoolExhausted { limit });
        }

        let mut buffer = self.free.pop().unwrap_or_default();
        buffer.resize(len, Mat4::IDENTITY);
        self.in_use += 1;

        Ok(PooledMatrices { pool: self, buffer })
    }

    /// Buffers currently rented.
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Buffers waiting to be reused.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    fn release(&mut self, buffer: Vec<Mat4>) {
        self.in_use -= 1;
        self.free.push(buffer);
    }
}

/// A rented bone matrix buffer. Returns itself to the pool on drop.
pub struct PooledMatrices<'p> {
    pool: &'p mut BoneMatrixPool,
    buffer: Vec<Mat4>,
}

impl Deref for PooledMatrices<'_> {
    type Target = [Mat4];

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for PooledMatrices<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl Drop for PooledMatrices<'_> {
    fn drop(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        self.pool.release(buffer);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn buffer_is_returned_on_drop() -> Result<()> {
        let mut pool = BoneMatrixPool::new();
        {
            let buffer = pool.acquire(3)?;
            assert_eq!(buffer.len(), 3);
        }
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.available(), 1);
        Ok(())
    }

    #[test]
    fn buffers_are_reused_and_resized() -> Result<()> {
        let mut pool = BoneMatrixPool::new();
        {
            let mut buffer = pool.acquire(8)?;
            buffer[7] = Mat4::from_translation(Vec3::X);
        }
        let buffer = pool.acquire(2)?;
        assert_eq!(buffer.len(), 2);
        drop(buffer);
        assert_eq!(pool.available(), 1);
        Ok(())
    }

    #[test]
    fn limit_is_enforced() {
        let mut pool = BoneMatrixPool::with_limit(0);
        let err = pool.acquire(1).err();
        assert!(matches!(err, Some(HitboxError::PoolExhausted { limit: 0 })));
        assert_eq!(pool.in_use(), 0);
    }
}
