use crate::error::Error;
use crate::Result;
use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use bytes::Bytes;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Size in bytes a segment key must have.
pub const KEY_SIZE: usize = 16;
const BLOCK_SIZE: usize = 16;

/// Decodes a segment chunk. If `key` is [`None`] the chunk is returned unchanged, otherwise it's
/// decrypted with AES-128-CBC and a zero iv. Padding is not removed, the output has the same
/// length as the input.
pub fn decode(chunk: Bytes, key: Option<&[u8]>) -> Result<Bytes> {
    decode_with_iv(chunk, key, None)
}

/// Like [`decode`] but with an explicit iv. A [`None`] iv is treated as all zeros.
pub fn decode_with_iv(chunk: Bytes, key: Option<&[u8]>, iv: Option<[u8; 16]>) -> Result<Bytes> {
    let Some(key) = key else {
        return Ok(chunk);
    };

    if key.len() != KEY_SIZE {
        return Err(Error::Decryption {
            message: format!(
                "key must be {KEY_SIZE} bytes long but is {} bytes long",
                key.len()
            ),
        });
    }
    if chunk.len() % BLOCK_SIZE != 0 {
        return Err(Error::Decryption {
            message: format!(
                "encrypted data must be a multiple of {BLOCK_SIZE} bytes but is {} bytes long",
                chunk.len()
            ),
        });
    }

    let iv = iv.unwrap_or([0; 16]);
    let mut buf = chunk.to_vec();
    let decrypted_len = Aes128CbcDec::new_from_slices(key, &iv)
        .map_err(|e| Error::Decryption {
            message: e.to_string(),
        })?
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|e| Error::Decryption {
            message: e.to_string(),
        })?
        .len();
    buf.truncate(decrypted_len);

    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    // AES-128 of a zero block with a zero key
    const ZERO_KEY_CIPHERTEXT: [u8; 16] = [
        0x66, 0xe9, 0x4b, 0xd4, 0xef, 0x8a, 0x2c, 0x3b, 0x88, 0x4c, 0xfa, 0x59, 0xca, 0x34, 0x2b,
        0x2e,
    ];

    #[test]
    fn decrypts_known_answer() {
        let plain = decode(Bytes::from_static(&ZERO_KEY_CIPHERTEXT), Some(&[0; 16])).unwrap();
        assert_eq!(plain.as_ref(), &[0u8; 16])
    }

    #[test]
    fn explicit_iv_is_xored_into_first_block() {
        let iv = [0xff; 16];
        let plain =
            decode_with_iv(Bytes::from_static(&ZERO_KEY_CIPHERTEXT), Some(&[0; 16]), Some(iv))
                .unwrap();
        assert_eq!(plain.as_ref(), &[0xffu8; 16])
    }

    #[test]
    fn unencrypted_passes_through() {
        let chunk = Bytes::from_static(b"not encrypted, any length");
        assert_eq!(decode(chunk.clone(), None).unwrap(), chunk)
    }

    #[test]
    fn wrong_key_length() {
        let result = decode(Bytes::from_static(&ZERO_KEY_CIPHERTEXT), Some(&[0; 15]));
        assert!(matches!(result, Err(Error::Decryption { .. })))
    }

    #[test]
    fn unaligned_ciphertext() {
        let result = decode(Bytes::from_static(&[0; 17]), Some(&[0; 16]));
        assert!(matches!(result, Err(Error::Decryption { .. })))
    }
}
