//! Layout of a macOS `.iconset` directory.
//!
//! `iconutil` expects ten PNG slots with fixed file names: five point sizes,
//! each at 1x and 2x pixel density. The pixel sizes overlap (a 2x 16-point
//! icon and a 1x 32-point icon are both 32 pixels), which is why some sizes
//! appear twice.

use std::path::{Path, PathBuf};

/// One slot in an iconset: pixel size and the file name iconutil expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconsetEntry {
    pub pixels: u32,
    pub file_name: &'static str,
}

/// The nine slots produced by scaling the source image down.
pub const SCALED_ENTRIES: [IconsetEntry; 9] = [
    IconsetEntry { pixels: 16, file_name: "icon_16x16.png" },
    IconsetEntry { pixels: 32, file_name: "icon_16x16@2x.png" },
    IconsetEntry { pixels: 32, file_name: "icon_32x32.png" },
    IconsetEntry { pixels: 64, file_name: "icon_32x32@2x.png" },
    IconsetEntry { pixels: 128, file_name: "icon_128x128.png" },
    IconsetEntry { pixels: 256, file_name: "icon_128x128@2x.png" },
    IconsetEntry { pixels: 256, file_name: "icon_256x256.png" },
    IconsetEntry { pixels: 512, file_name: "icon_256x256@2x.png" },
    IconsetEntry { pixels: 512, file_name: "icon_512x512.png" },
];

/// The 1024-pixel slot, filled by copying the source image unchanged.
/// The source is treated as the 1024px master.
pub const COPY_ENTRY: IconsetEntry = IconsetEntry {
    pixels: 1024,
    file_name: "icon_512x512@2x.png",
};

/// Total number of files written into the iconset.
pub const ENTRY_COUNT: usize = SCALED_ENTRIES.len() + 1;

/// Directory name for the working iconset. The `.iconset` suffix is
/// mandatory; iconutil refuses directories without it.
pub const ICONSET_DIR_NAME: &str = "AppIcon.iconset";

/// Default output path for a source image: a sibling file with the
/// extension replaced by `.icns`.
pub fn icns_output_path(source: &Path) -> PathBuf {
    source.with_extension("icns")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iconset_has_ten_slots() {
        assert_eq!(ENTRY_COUNT, 10);
    }

    #[test]
    fn slot_names_are_unique() {
        let mut names: Vec<&str> = SCALED_ENTRIES.iter().map(|e| e.file_name).collect();
        names.push(COPY_ENTRY.file_name);
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn retina_slots_are_double_their_point_size() {
        for entry in &SCALED_ENTRIES {
            if let Some(points) = entry
                .file_name
                .strip_prefix("icon_")
                .and_then(|s| s.split('x').next())
                .and_then(|s| s.parse::<u32>().ok())
            {
                if entry.file_name.contains("@2x") {
                    assert_eq!(entry.pixels, points * 2, "{}", entry.file_name);
                } else {
                    assert_eq!(entry.pixels, points, "{}", entry.file_name);
                }
            } else {
                panic!("unparseable slot name: {}", entry.file_name);
            }
        }
    }

    #[test]
    fn copy_slot_is_the_1024_master() {
        assert_eq!(COPY_ENTRY.pixels, 1024);
        assert_eq!(COPY_ENTRY.file_name, "icon_512x512@2x.png");
    }

    #[test]
    fn output_path_replaces_extension() {
        let out = icns_output_path(Path::new("/tmp/art/logo.png"));
        assert_eq!(out, PathBuf::from("/tmp/art/logo.icns"));
    }

    #[test]
    fn output_path_for_extensionless_source() {
        let out = icns_output_path(Path::new("/tmp/logo"));
        assert_eq!(out, PathBuf::from("/tmp/logo.icns"));
    }

    #[test]
    fn iconset_dir_name_has_required_suffix() {
        assert!(ICONSET_DIR_NAME.ends_with(".iconset"));
    }
}
