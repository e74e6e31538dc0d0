//! Export listing parse benchmarks
//!
//! Large libraries export thousands of symbols; parsing runs once per load
//! but should stay well below the cost of the tool invocation itself.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dynrun_core::exports::{parse_dumpbin_output, parse_nm_output};

fn dumpbin_listing(symbols: usize) -> String {
    let mut text = String::from(
        "Microsoft (R) COFF/PE Dumper Version 14.38.33133.0\n\
         Copyright (C) Microsoft Corporation.  All rights reserved.\n\n\
         \x20   ordinal hint RVA      name\n\n",
    );
    for i in 0..symbols {
        if i % 5 == 0 {
            text.push_str(&format!(
                "{:>10} {:>4} {:08X} fn_{i} = @ILT+{}(fn_{i})\n",
                i + 1,
                i,
                0x11000 + i * 0x40,
                i * 5
            ));
        } else {
            text.push_str(&format!("{:>10} {:>4} {:08X} fn_{i}\n", i + 1, i, 0x11000 + i * 0x40));
        }
    }
    text.push_str("\n  Summary\n\n        1000 .data\n       1D000 .rdata\n");
    text
}

fn nm_listing(symbols: usize) -> String {
    let mut text = String::from("                 w __gmon_start__\n");
    for i in 0..symbols {
        text.push_str(&format!("{:016x} T fn_{i}\n", 0x1100 + i * 16));
        if i % 3 == 0 {
            text.push_str(&format!("                 U dep_{i}@GLIBC_2.2.5\n"));
        }
    }
    text
}

fn bench_parse_dumpbin(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_dumpbin");
    for size in [10, 1_000, 10_000] {
        let text = dumpbin_listing(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_dumpbin_output(black_box(text)));
        });
    }
    group.finish();
}

fn bench_parse_nm(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_nm");
    for size in [10, 1_000, 10_000] {
        let text = nm_listing(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_nm_output(black_box(text)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_dumpbin, bench_parse_nm);
criterion_main!(benches);
