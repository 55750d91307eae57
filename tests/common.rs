#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SELECTABLE_SIZE: usize = 150_000;

pub fn write_sized(path: &Path, size: usize, fill: u8) -> PathBuf {
    File::create(path)
        .unwrap()
        .write_all(&vec![fill; size])
        .unwrap();
    path.to_path_buf()
}

/// Two selectable images at the top, one nested, plus files the filter drops.
pub fn create_image_tree(root: &Path) -> Vec<PathBuf> {
    let nested = root.join("nested");
    std::fs::create_dir(&nested).unwrap();

    let selectable = vec![
        write_sized(&root.join("photo.jpg"), SELECTABLE_SIZE, b'a'),
        write_sized(&root.join("icon.png"), SELECTABLE_SIZE, b'b'),
        write_sized(&nested.join("deep.png"), SELECTABLE_SIZE, b'c'),
    ];

    write_sized(&root.join("tiny.png"), 512, b'd');
    write_sized(&root.join("notes.txt"), SELECTABLE_SIZE, b'e');
    write_sized(&nested.join("huge.jpg"), 5_200_001, b'f');

    selectable
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn accepted_body(input_size: usize, output_size: usize, url: &str) -> Value {
    json!({
        "input": { "size": input_size, "type": "image/png" },
        "output": {
            "size": output_size,
            "type": "image/png",
            "width": 640,
            "height": 480,
            "ratio": output_size as f64 / input_size as f64,
            "url": url
        }
    })
}
