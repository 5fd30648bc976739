use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
  #[default]
  Image,
  Video,
}

impl FileKind {
  pub fn folder(&self) -> &'static str {
    match self {
      FileKind::Image => "images",
      FileKind::Video => "videos",
    }
  }

  pub fn default_file_name(&self) -> &'static str {
    match self {
      FileKind::Image => "image.jpg",
      FileKind::Video => "video.mp4",
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UploadQuery {
  #[serde(rename = "fileType", default)]
  pub file_type: FileKind,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
  pub url: String,
  pub file_path: String,
  pub name: String,
  pub file_type: FileKind,
  pub size: usize,
}
