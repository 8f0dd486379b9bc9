use crate::bits;
use crate::config::CodecConfig;
use crate::crypto::{AesCbcCipher, ByteCipher};
use crate::error::Error;
use crate::grid;
use crate::image::RgbImage;
use crate::layout::GridLayout;

/// A rendered message together with the layout it was drawn with.
#[derive(Debug, Clone)]
pub struct EncodedGrid {
    pub layout: GridLayout,
    pub image: RgbImage,
}

/// Encoder and decoder pipelines around a pluggable byte cipher.
///
/// Encode: text → cipher → bits → layout → image.
/// Decode: image → tile size → bits → bytes → cipher → text.
#[derive(Debug, Clone)]
pub struct Codec<C> {
    cipher: C,
    config: CodecConfig,
}

impl Codec<AesCbcCipher> {
    /// AES-256-CBC codec keyed by `passphrase`.
    pub fn with_passphrase(passphrase: &str, config: CodecConfig) -> Self {
        Self::new(AesCbcCipher::from_passphrase(passphrase), config)
    }
}

impl<C: ByteCipher> Codec<C> {
    pub fn new(cipher: C, config: CodecConfig) -> Self {
        Self { cipher, config }
    }

    /// Encrypt `message` and render it as a tile grid.
    ///
    /// Fails with [`LayoutError::Infeasible`](crate::error::LayoutError::Infeasible)
    /// before anything is rendered if the grid does not fit the budget.
    pub fn encode(&self, message: &str) -> Result<EncodedGrid, Error> {
        let ciphertext = self.cipher.encrypt(message.as_bytes());
        let bits = bits::bytes_to_bits(&ciphertext);
        let layout = GridLayout::plan(bits.len(), self.config.max_budget)?;
        log::debug!(
            "encoding {} message bytes as {} ciphertext bytes",
            message.len(),
            ciphertext.len()
        );
        let image = grid::render_grid(&layout, &bits);
        Ok(EncodedGrid { layout, image })
    }

    /// Recover and decrypt the message carried by `image`.
    pub fn decode(&self, image: &RgbImage) -> Result<String, Error> {
        let ciphertext = grid::decode_payload(image, &self.config)?;
        let plaintext = self.cipher.decrypt(&ciphertext)?;
        Ok(String::from_utf8(plaintext)?)
    }
}

/// Encrypt `message` with `passphrase` and render it within `max_budget` pixels.
pub fn encode_message(message: &str, passphrase: &str, max_budget: u32) -> Result<RgbImage, Error> {
    let config = CodecConfig {
        max_budget,
        ..CodecConfig::default()
    };
    Ok(Codec::with_passphrase(passphrase, config).encode(message)?.image)
}

/// Decode an image produced by [`encode_message`].
pub fn decode_message(image: &RgbImage, passphrase: &str) -> Result<String, Error> {
    Codec::with_passphrase(passphrase, CodecConfig::default()).decode(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CryptoError, InferenceError, LayoutError};
    use crate::types::Rgb;

    /// Identity transform, so grid contents are known in advance.
    struct Plain;

    impl ByteCipher for Plain {
        fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
            plaintext.to_vec()
        }

        fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
            Ok(ciphertext.to_vec())
        }
    }

    #[test]
    fn encode_layout_for_hi() {
        let encoded = Codec::with_passphrase("secret", CodecConfig::default())
            .encode("Hi")
            .unwrap();
        assert_eq!(encoded.layout.bit_count, 256);
        assert_eq!(encoded.layout.dimension, 16);
        assert_eq!(encoded.layout.tile_size, 25);
        assert_eq!((encoded.image.width, encoded.image.height), (400, 400));
    }

    #[test]
    fn round_trip_with_passphrase() {
        let image = encode_message("Hi", "secret", 400).unwrap();
        assert_eq!(decode_message(&image, "secret").unwrap(), "Hi");
    }

    #[test]
    fn plain_cipher_round_trip() {
        let codec = Codec::new(Plain, CodecConfig::default());
        let encoded = codec.encode("grid").unwrap();
        assert_eq!(encoded.layout.bit_count, 32);
        assert_eq!(codec.decode(&encoded.image).unwrap(), "grid");
    }

    #[test]
    fn budget_too_small_fails_before_rendering() {
        let codec = Codec::new(
            Plain,
            CodecConfig {
                max_budget: 4,
                ..CodecConfig::default()
            },
        );
        // 24 bits need a 5x5 grid
        let err = codec.encode("abc").unwrap_err();
        assert!(matches!(
            err,
            Error::Layout(LayoutError::Infeasible { bits: 24, grid: 5, budget: 4 })
        ));
    }

    #[test]
    fn blank_image_is_not_a_key_error() {
        let image = RgbImage::filled(50, 50, Rgb::WHITE);
        let err = decode_message(&image, "secret").unwrap_err();
        assert!(matches!(
            err,
            Error::Inference(InferenceError::NoColorTransition { .. })
        ));
        assert!(!err.is_key_error());
    }

    #[test]
    fn truncated_grid_is_not_a_key_error() {
        // one black tile between white ones: the scan ends after tile 0
        let mut image = RgbImage::filled(40, 40, Rgb::WHITE);
        image.fill_rect(10, 0, 10, 10, Rgb::BLACK);
        let err = decode_message(&image, "anything").unwrap_err();
        assert!(matches!(
            err,
            Error::Crypto(CryptoError::CiphertextTooShort(0))
        ));
        assert!(!err.is_key_error());
    }

    #[test]
    fn ragged_ciphertext_is_not_a_key_error() {
        // 20 bytes: a full IV plus a 4 byte body
        let (_, image) = grid::encode_payload(&[0x5a; 20], 400).unwrap();
        let err = decode_message(&image, "anything").unwrap_err();
        assert!(matches!(
            err,
            Error::Crypto(CryptoError::NotBlockAligned(4))
        ));
        assert!(!err.is_key_error());
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let codec = Codec::new(Plain, CodecConfig::default());
        // 0xc3 starts a two-byte sequence, 0x28 is not a continuation byte
        let (_, image) = grid::encode_payload(&[0xc3, 0x28], 64).unwrap();
        let err = codec.decode(&image).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8(_)));
        assert!(err.is_key_error());
    }
}
