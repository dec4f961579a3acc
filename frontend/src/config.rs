
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

pub const APP_NAME: &str = "kubeopt";

/// Site-wide settings handed to components through context.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub backend_url: String,
    pub demo_data_path: String,
    pub contact_path: String,
    pub newsletter_path: String,
    pub download_path: String,
    pub pageview_path: String,
    pub event_path: String,

    pub docker_registry: String,
    pub docker_image: String,
    pub docker_tag: String,

    pub notification_ms: u32,
    pub counter_duration_ms: u32,
    pub frame_ms: u32,
    pub visibility_threshold: f64,
    pub visibility_root_margin: String,
    pub header_scroll_threshold: f64,
    pub stagger_ms: u32,
    pub copy_feedback_ms: u32,
    pub typewriter_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            backend_url: get_backend_url().to_string(),
            demo_data_path: "/api/demo-data".to_string(),
            contact_path: "/contact".to_string(),
            newsletter_path: "/api/newsletter".to_string(),
            download_path: "/api/download".to_string(),
            pageview_path: "/api/analytics/pageview".to_string(),
            event_path: "/api/analytics/event".to_string(),

            docker_registry: "docker.io".to_string(),
            docker_image: "kubeopt/aks-optimizer".to_string(),
            docker_tag: "latest".to_string(),

            notification_ms: 5_000,
            counter_duration_ms: 2_000,
            frame_ms: 16,
            visibility_threshold: 0.1,
            visibility_root_margin: "0px 0px -50px 0px".to_string(),
            header_scroll_threshold: 100.0,
            stagger_ms: 100,
            copy_feedback_ms: 2_000,
            typewriter_ms: 30,
        }
    }
}

impl SiteConfig {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }

    pub fn docker_pull_command(&self) -> String {
        format!(
            "docker pull {}/{}:{}",
            self.docker_registry, self.docker_image, self.docker_tag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_backend_url() {
        let config = SiteConfig {
            backend_url: "http://localhost:3001".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.url(&config.demo_data_path), "http://localhost:3001/api/demo-data");
        assert_eq!(config.url(&config.contact_path), "http://localhost:3001/contact");
    }

    #[test]
    fn docker_pull_command_uses_image_coordinates() {
        let config = SiteConfig::default();
        assert_eq!(
            config.docker_pull_command(),
            "docker pull docker.io/kubeopt/aks-optimizer:latest"
        );
    }
}
