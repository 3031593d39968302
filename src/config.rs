// Environment-derived configuration, constructed once in main and injected
// explicitly; there is no global config singleton.
use std::env;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub cloudinary: Option<CloudinaryConfig>,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: Url,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
}

impl SupabaseConfig {
    /// Key for backend-initiated operations; the service-role key when
    /// configured (bypasses row policies), otherwise the anonymous key.
    pub fn privileged_key(&self) -> &str {
        self.service_role_key
            .as_deref()
            .or(self.anon_key.as_deref())
            .unwrap_or_default()
    }

    /// Key for identity-free public reads and token verification.
    pub fn public_key(&self) -> &str {
        self.anon_key
            .as_deref()
            .or(self.service_role_key.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub public_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any name → value lookup (env in production, a map in
    /// tests).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = get("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);

        let raw_url = get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidUrl {
            name: "SUPABASE_URL",
            source,
        })?;

        let anon_key = get("SUPABASE_ANON_KEY").filter(|k| !k.is_empty());
        let service_role_key = get("SUPABASE_SERVICE_ROLE_KEY").filter(|k| !k.is_empty());
        if anon_key.is_none() && service_role_key.is_none() {
            return Err(ConfigError::Missing("SUPABASE_ANON_KEY"));
        }

        // Cloudinary only when fully configured; otherwise local-disk uploads
        let cloudinary = match (
            get("CLOUDINARY_CLOUD_NAME"),
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret))
                if !cloud_name.is_empty() && !api_key.is_empty() && !api_secret.is_empty() =>
            {
                Some(CloudinaryConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                })
            }
            _ => None,
        };

        let uploads = UploadConfig {
            dir: get("UPLOAD_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("uploads")),
            public_base_url: get("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://127.0.0.1:{}", port)),
        };

        Ok(Self {
            server: ServerConfig { port },
            supabase: SupabaseConfig {
                url,
                anon_key,
                service_role_key,
            },
            cloudinary,
            uploads,
        })
    }
}
