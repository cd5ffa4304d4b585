//! QR provisioning: canonical payload URL + data-URI encoding.
//!
//! Encoding is pure and deterministic. Re-encoding the same campaign id
//! against the same base URL yields an interchangeable data URI.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::Luma;
use qrcode::QrCode;

use crate::errors::{CampaignHubError, Result};

/// 活动详情页的规范深链：`{frontend_base}/campaign/{id}`
pub fn campaign_payload_url(frontend_base: &str, campaign_id: &str) -> String {
    format!(
        "{}/campaign/{}",
        frontend_base.trim_end_matches('/'),
        campaign_id
    )
}

/// QR 编码器接口，外部协作方，便于测试替换
pub trait QrEncoder: Send + Sync {
    /// 将 payload 编码为可内嵌的图片表示（data URI）
    fn encode(&self, payload: &str) -> Result<String>;
}

/// 编码为 PNG data URI（`data:image/png;base64,...`）
#[derive(Debug, Clone, Copy)]
pub struct PngDataUriEncoder {
    /// 每个 QR module 的像素数
    pub scale: u32,
}

impl Default for PngDataUriEncoder {
    fn default() -> Self {
        PngDataUriEncoder { scale: 8 }
    }
}

impl QrEncoder for PngDataUriEncoder {
    fn encode(&self, payload: &str) -> Result<String> {
        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| CampaignHubError::qr_encoding(format!("QR 编码失败: {}", e)))?;

        let img = code
            .render::<Luma<u8>>()
            .module_dimensions(self.scale, self.scale)
            .build();

        let mut png_bytes = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut png_bytes),
                image::ImageFormat::Png,
            )
            .map_err(|e| CampaignHubError::qr_encoding(format!("PNG 编码失败: {}", e)))?;

        Ok(format!("data:image/png;base64,{}", BASE64.encode(&png_bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_url() {
        assert_eq!(
            campaign_payload_url("http://localhost:3000", "c-1"),
            "http://localhost:3000/campaign/c-1"
        );
    }

    #[test]
    fn test_payload_url_trims_trailing_slash() {
        assert_eq!(
            campaign_payload_url("https://m.example.com/", "c-1"),
            "https://m.example.com/campaign/c-1"
        );
    }

    #[test]
    fn test_encode_produces_png_data_uri() {
        let encoder = PngDataUriEncoder::default();
        let uri = encoder
            .encode("http://localhost:3000/campaign/c-1")
            .unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = PngDataUriEncoder::default();
        let payload = "http://localhost:3000/campaign/c-1";
        assert_eq!(encoder.encode(payload).unwrap(), encoder.encode(payload).unwrap());
    }
}
