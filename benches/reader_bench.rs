use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use csv_record_reader::models::Account;
use csv_record_reader::reader::{CountingSink, CsvFileReader, DiscardSink};
use std::io::Write;
use tempfile::NamedTempFile;

const LINES: usize = 50_000;

fn account_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,name,balance").unwrap();
    for i in 0..LINES {
        writeln!(file, "{},\"holder {}\",{}", i, i, i % 10_000).unwrap();
    }
    file.flush().unwrap();
    file
}

fn bench_process(c: &mut Criterion) {
    let file = account_file();
    let mut group = c.benchmark_group("process");
    group.sample_size(20);

    let mut worker_counts = vec![1, 2, 4, num_cpus::get()];
    worker_counts.sort_unstable();
    worker_counts.dedup();

    for workers in worker_counts {
        let reader = CsvFileReader::<Account>::new(file.path(), workers).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(workers), &reader, |b, reader| {
            b.iter(|| {
                let sink = CountingSink::new(DiscardSink);
                reader.process(&sink);
                assert_eq!(sink.summary().records_loaded, LINES);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
