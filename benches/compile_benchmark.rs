use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skin_compiler::{compile_source, parse_candidate, CompilerConfig, DesignSystem};

const SKIN_SOURCE: &str = r#"
import { PlayButton, MuteButton, TimeSlider } from '@player/react';

const styles = {
  Container: 'flex items-center justify-between p-2 bg-gray-900 rounded-lg',
  Button: 'p-2 rounded hover:bg-gray-700 data-[disabled]:opacity-50',
  Slider: 'relative w-full h-1 md:h-2 group-hover:bg-gray-300',
  Label: 'text-sm text-white truncate',
};

export function BenchSkin() {
  return (
    <div className={styles.Container}>
      <PlayButton className={styles.Button} ariaLabel="Play" />
      <TimeSlider className={styles.Slider} />
      <span className={styles.Label}>Now playing</span>
      <MuteButton className={styles.Button} />
    </div>
  );
}
"#;

const CANDIDATES: &[&str] = &[
    "flex",
    "items-center",
    "p-2",
    "bg-gray-900",
    "hover:bg-gray-700",
    "data-[disabled]:opacity-50",
    "md:h-2",
    "group-hover/name:[&_p]:flex",
    "-translate-x-px",
    "!hover:bg-blue-500/50",
];

fn bench_parse_candidate(c: &mut Criterion) {
    let ds = DesignSystem::shared();
    c.bench_function("parse_candidate", |b| {
        b.iter(|| {
            for candidate in CANDIDATES {
                black_box(parse_candidate(black_box(candidate), ds));
            }
        })
    });
}

fn bench_compile_source(c: &mut Criterion) {
    let config = CompilerConfig::default();
    c.bench_function("compile_source_web_component", |b| {
        b.iter(|| {
            black_box(
                compile_source(black_box(SKIN_SOURCE), "bench_skin.jsx", &config)
                    .expect("benchmark source compiles"),
            )
        })
    });
}

criterion_group!(benches, bench_parse_candidate, bench_compile_source);
criterion_main!(benches);
