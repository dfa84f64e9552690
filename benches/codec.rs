//! Benchmarks for the recording codec.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;

use rig_recorder::{
    LocalPose, NodeId, PoseSource, RecorderConfig, RecordingDocument, RecordingSession, RigTree,
};

struct SwayPose {
    time: f32,
}

impl PoseSource for SwayPose {
    fn local_pose(&self, node: NodeId) -> LocalPose {
        let phase = node.index() as f32 * 0.3 + self.time;
        LocalPose {
            position: Vec3::new(0.0, phase.sin(), 0.0),
            euler_degrees: Vec3::new(0.0, phase.cos() * 45.0, 0.0),
            scale: Vec3::ONE,
        }
    }
}

fn recorded_document(bones: usize, frames: usize) -> RecordingDocument {
    let mut rig = RigTree::new("Armature");
    let hips = rig.add_child(rig.root(), "Hips");
    let mut parent = hips;
    for i in 0..bones {
        parent = rig.add_child(parent, format!("Bone{i}"));
    }

    let mut session = RecordingSession::new(rig, hips, RecorderConfig::default());
    session.start(0.0);
    for f in 0..frames {
        let time = f as f32 / 24.0;
        session.tick(time, &SwayPose { time });
    }
    session.stop();
    session.document().unwrap()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for bones in [8, 32, 128] {
        let document = recorded_document(bones, 240);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}bones", bones)),
            &bones,
            |b, _| {
                b.iter(|| black_box(&document).to_bytes().unwrap());
            },
        );
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for bones in [8, 32, 128] {
        let bytes = recorded_document(bones, 240).to_bytes().unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}bones", bones)),
            &bones,
            |b, _| {
                b.iter(|| RecordingDocument::from_bytes(black_box(&bytes)).unwrap().unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
