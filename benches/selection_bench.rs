use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use img_shrink::selector::select_files;
use img_shrink::utils::format_kb;
use img_shrink::Configuration;
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;

fn create_tree(depth: usize, files_per_dir: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let mut dir = temp_dir.path().to_path_buf();

    for level in 0..depth {
        for i in 0..files_per_dir {
            let name = match i % 3 {
                0 => format!("img{}.jpg", i),
                1 => format!("img{}.png", i),
                _ => format!("doc{}.txt", i),
            };
            // Every other file is large enough to pass the size filter
            let size = if i % 2 == 0 { 120_000 } else { 1_024 };
            File::create(dir.join(name))
                .unwrap()
                .write_all(&vec![0u8; size])
                .unwrap();
        }
        dir = dir.join(format!("level{}", level));
        fs::create_dir(&dir).unwrap();
    }

    temp_dir
}

fn bench_select_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_files");

    for &(depth, per_dir) in &[(1usize, 20usize), (4, 20), (8, 10)] {
        let tree = create_tree(depth, per_dir);
        let config = Configuration::new(tree.path(), true);
        group.bench_with_input(
            BenchmarkId::new("recursive", format!("{}x{}", depth, per_dir)),
            &config,
            |b, config| b.iter(|| select_files(black_box(config)).unwrap()),
        );
    }

    group.finish();
}

fn bench_format_kb(c: &mut Criterion) {
    c.bench_function("format_kb", |b| b.iter(|| format_kb(black_box(866_210))));
}

criterion_group!(benches, bench_select_files, bench_format_kb);
criterion_main!(benches);
