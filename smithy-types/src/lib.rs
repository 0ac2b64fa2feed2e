/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod retry;

/// Binary Blob Type
///
/// Blobs represent protocol-agnostic binary content.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default)]
pub struct Blob {
    inner: Vec<u8>,
}

impl Blob {
    pub fn new<T: Into<Vec<u8>>>(input: T) -> Self {
        Blob {
            inner: input.into(),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for Blob {
    fn from(inner: Vec<u8>) -> Self {
        Blob { inner }
    }
}

impl From<&[u8]> for Blob {
    fn from(data: &[u8]) -> Self {
        Blob::new(data)
    }
}

#[cfg(test)]
mod test {
    use crate::Blob;

    #[test]
    fn blob_exposes_bytes() {
        let blob = Blob::new(&b"\x00\xffhello"[..]);
        assert_eq!(blob.as_ref(), b"\x00\xffhello");
        assert_eq!(blob.len(), 7);
        assert_eq!(blob.into_inner(), b"\x00\xffhello".to_vec());
        assert!(Blob::default().is_empty());
    }
}
