pub mod config;
pub mod css;
pub mod error;
pub mod layout;
pub mod model;
pub mod noise;
pub mod retry;
pub mod trail;

pub use config::SiteConfig;
pub use css::{is_transparent, parse_css_color};
pub use error::InitError;
pub use layout::{ImageOutcome, LoadJoin, TileSet, Viewport};
pub use model::*;
pub use noise::{Blob, BlobField, apply_grain, outline_path, value_noise};
pub use retry::Backoff;
pub use trail::{Trail, TrailPoint, TrailSegment};

// Re-export kurbo geometry so downstream crates share one version
pub use kurbo::{Point, Rect, Size, Vec2};
