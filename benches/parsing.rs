
use config_generator::generate_config;
use criterion::{criterion_group, criterion_main, Criterion};
use inistore::{IniOptions, IniReader};

fn parsing_benchmarks(c: &mut Criterion) {
    // Generate configs of different sizes
    let small = generate_config(50);
    let medium = generate_config(300);
    let large = generate_config(1_000);
    let xlarge = generate_config(10_000);

    let mut group = c.benchmark_group("parsing");

    group.bench_function("small_50_lines", |b| {
        b.iter(|| {
            let mut reader = IniReader::new();
            reader.parse(&small).unwrap()
        })
    });

    group.bench_function("medium_300_lines", |b| {
        b.iter(|| {
            let mut reader = IniReader::new();
            reader.parse(&medium).unwrap()
        })
    });

    group.bench_function("large_1000_lines", |b| {
        b.iter(|| {
            let mut reader = IniReader::new();
            reader.parse(&large).unwrap()
        })
    });

    group.bench_function("xlarge_10000_lines", |b| {
        b.iter(|| {
            let mut reader = IniReader::new();
            reader.parse(&xlarge).unwrap()
        })
    });

    // Early exit after the first section
    group.bench_function("xlarge_include_first", |b| {
        let options = IniOptions::new().include("section0");
        b.iter(|| {
            let mut reader = IniReader::with_options(options.clone());
            reader.parse(&xlarge).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmarks);
criterion_main!(benches);
