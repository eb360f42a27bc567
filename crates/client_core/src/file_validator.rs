const ACCEPTED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Whether `filename` ends in an extension accepted for receipts (jpg, jpeg, png).
pub fn is_accepted_image(filename: &str) -> bool {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    ACCEPTED_IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_extensions_in_any_case() {
        for name in [
            "receipt.jpg",
            "receipt.JPG",
            "scan.jpeg",
            "scan.JpEg",
            "image.png",
            "archive.tar.PNG",
        ] {
            assert!(is_accepted_image(name), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_other_or_missing_extensions() {
        for name in [
            "document.pdf",
            "photo.gif",
            "png",
            "receipt.",
            "",
            "receipt.png.exe",
            "receipt.jpgx",
        ] {
            assert!(!is_accepted_image(name), "{name} should be rejected");
        }
    }
}
