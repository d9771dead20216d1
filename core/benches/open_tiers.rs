use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minegrid_core::*;

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::new_unchecked(9, 9, 10)),
    ("intermediate", GameConfig::new_unchecked(16, 16, 40)),
    ("expert", GameConfig::new_unchecked(16, 30, 99)),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in TIERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut generator = RandomMinefieldGenerator::new(0xdead_beef);
            b.iter(|| black_box(generator.generate(config)));
        });
    }
    group.finish();
}

/// Opens every cell in order on a sparse board, which is dominated by flood fill.
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for (name, config) in TIERS {
        let sparse = GameConfig::new_unchecked(config.rows, config.columns, 10);
        let mut grid = Grid::with_config(RandomMinefieldGenerator::new(7), sparse).unwrap();
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                grid.restart_game();
                let (rows, columns) = grid.size();
                'sweep: for row in 0..rows {
                    for column in 0..columns {
                        if grid.is_finished() {
                            break 'sweep;
                        }
                        black_box(grid.open((row, column)).unwrap());
                    }
                }
                grid.drain_modified_cells().len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_sweep);
criterion_main!(benches);
