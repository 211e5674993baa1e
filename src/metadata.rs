//! metadata.rs
//!
//! Static frame embed descriptor. The host reads it from an HTML attribute,
//! so the serialized JSON has its quotes escaped.

use serde::Serialize;

pub const SITE_URL: &str = "https://iss.orbiter.website";
pub const PREVIEW_IMAGE_URL: &str = "https://iss.orbiter.website/og.png";
pub const SPLASH_IMAGE_URL: &str = "https://orbiter.host/icon.png";
pub const SPLASH_BACKGROUND: &str = "#ffffff";

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FrameEmbed {
    pub version: &'static str,
    pub image_url: String,
    pub button: FrameButton,
}

#[derive(Serialize, Debug, Clone)]
pub struct FrameButton {
    pub title: String,
    pub action: LaunchAction,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAction {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
}

impl Default for FrameEmbed {
    fn default() -> Self {
        Self {
            version: "next",
            image_url: PREVIEW_IMAGE_URL.to_string(),
            button: FrameButton {
                title: "Launch".to_string(),
                action: LaunchAction {
                    kind: "launch_frame",
                    name: "Launch".to_string(),
                    url: SITE_URL.to_string(),
                    splash_image_url: SPLASH_IMAGE_URL.to_string(),
                    splash_background_color: SPLASH_BACKGROUND.to_string(),
                },
            },
        }
    }
}

impl FrameEmbed {
    /// Compact JSON with every `"` replaced by `&quot;`
    pub fn render_escaped(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace('"', "&quot;"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor_json() {
        let json = serde_json::to_value(FrameEmbed::default()).unwrap();

        assert_eq!(json["version"], "next");
        assert_eq!(json["imageUrl"], PREVIEW_IMAGE_URL);
        assert_eq!(json["button"]["title"], "Launch");
        assert_eq!(json["button"]["action"]["type"], "launch_frame");
        assert_eq!(json["button"]["action"]["url"], SITE_URL);
        assert_eq!(json["button"]["action"]["splashImageUrl"], SPLASH_IMAGE_URL);
        assert_eq!(json["button"]["action"]["splashBackgroundColor"], "#ffffff");
    }

    #[test]
    fn test_render_escaped() {
        let rendered = FrameEmbed::default().render_escaped().unwrap();

        assert_eq!(
            rendered,
            "{&quot;version&quot;:&quot;next&quot;,\
             &quot;imageUrl&quot;:&quot;https://iss.orbiter.website/og.png&quot;,\
             &quot;button&quot;:{&quot;title&quot;:&quot;Launch&quot;,\
             &quot;action&quot;:{&quot;type&quot;:&quot;launch_frame&quot;,\
             &quot;name&quot;:&quot;Launch&quot;,\
             &quot;url&quot;:&quot;https://iss.orbiter.website&quot;,\
             &quot;splashImageUrl&quot;:&quot;https://orbiter.host/icon.png&quot;,\
             &quot;splashBackgroundColor&quot;:&quot;#ffffff&quot;}}}"
        );
        assert!(!rendered.contains('"'));
    }
}
