/*!
 * Ready Queue Benchmarks
 *
 * Cost of the per-tick re-sort under each ordering policy
 */

use cpu_sched_sim::process::{ProcessHandle, SimProcess};
use cpu_sched_sim::scheduler::ReadyQueue;
use cpu_sched_sim::{ProcessDescriptor, SchedulingPolicy};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn handles(count: u32) -> Vec<ProcessHandle> {
    (0..count)
        .map(|pid| {
            SimProcess::new(
                &ProcessDescriptor {
                    pid,
                    priority: (pid.wrapping_mul(7) % 10) as u8,
                    start_time: 0,
                    bursts: vec![u64::from(pid.wrapping_mul(37) % 500) + 1, 20, 30],
                },
                0,
            )
        })
        .collect()
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("ready_queue_sort");

    for policy in [
        SchedulingPolicy::ShortestRemainingTime,
        SchedulingPolicy::PreemptivePriority,
    ] {
        for size in [16u32, 128, 1024] {
            let processes = handles(size);
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), size),
                &processes,
                |b, processes| {
                    b.iter_batched(
                        || {
                            let mut queue = ReadyQueue::new();
                            for h in processes {
                                queue.push(h.clone());
                            }
                            queue
                        },
                        |mut queue| {
                            queue.sort(black_box(policy));
                            queue
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

fn bench_push_pop(c: &mut Criterion) {
    let processes = handles(256);

    c.bench_function("ready_queue_push_pop", |b| {
        b.iter(|| {
            let mut queue = ReadyQueue::new();
            for h in &processes {
                queue.push(h.clone());
            }
            while let Some(h) = queue.pop() {
                black_box(h);
            }
        });
    });
}

criterion_group!(benches, bench_sort, bench_push_pop);
criterion_main!(benches);
