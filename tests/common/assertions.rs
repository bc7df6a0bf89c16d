//! Assertions over written archives

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read every entry of the zip at `path` as (name, content), in archive order
pub fn read_archive(path: &Path) -> Vec<(String, String)> {
    let file = File::open(path).expect("archive should exist");
    let mut archive = zip::ZipArchive::new(file).expect("archive should be a valid zip");

    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).expect("entry should be readable");
            let mut content = String::new();
            entry
                .read_to_string(&mut content)
                .expect("entry should be UTF-8");
            (entry.name().to_string(), content)
        })
        .collect()
}

/// Assert the archive at `path` holds exactly `expected`, in order
pub fn assert_archive(path: &Path, expected: &[(&str, &str)]) {
    let actual = read_archive(path);
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(n, c)| (n.to_string(), c.to_string()))
        .collect();
    assert_eq!(actual, expected, "archive contents differ");
}
