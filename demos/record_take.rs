//! Record a synthetic arm-swing take and read it back.

use std::time::Instant;

use glam::Vec3;
use rig_recorder::{
    LocalPose, NodeId, PoseSource, RecorderConfig, RecordingDocument, RecordingSession, RigTree,
};

struct Sway;

impl PoseSource for Sway {
    fn local_pose(&self, node: NodeId) -> LocalPose {
        // Not a real skeleton, just something visibly animated per bone.
        let phase = node.index() as f32 * 0.4;
        LocalPose {
            position: Vec3::new(0.0, 1.0 + phase.sin() * 0.05, 0.0),
            euler_degrees: Vec3::new(0.0, 0.0, phase.cos() * 30.0),
            scale: Vec3::ONE,
        }
    }
}

fn main() {
    env_logger::init();

    let mut rig = RigTree::new("Armature");
    let hips = rig.add_child(rig.root(), "Hips");
    let spine = rig.add_child(hips, "Spine");
    for side in ["Left", "Right"] {
        let shoulder = rig.add_child(spine, format!("{side}Shoulder"));
        let arm = rig.add_child(shoulder, format!("{side}Arm"));
        rig.add_child(arm, format!("{side}Hand"));
    }

    let mut session = RecordingSession::new(rig, hips, RecorderConfig::default());

    println!("Recording 2s at 24 fps...");
    let start = Instant::now();
    session.start(0.0);
    for frame in 0..48 {
        session.tick(frame as f32 / 24.0, &Sway);
    }
    session.stop();

    let path = std::env::temp_dir().join("record_take.dat");
    let (clip, stats) = session.save(&path).expect("save recording");
    println!("Saved {} ({})", path.display(), stats);
    println!("Recorded in {:.2?}", start.elapsed());
    println!();

    let bytes = std::fs::read(&path).expect("read recording back");
    let document = RecordingDocument::from_bytes(&bytes)
        .expect("decode recording")
        .expect("recording is not empty");

    println!("Decoded {} frames, bones:", document.frame_count());
    println!("  {} (root)", document.root().path());
    for set in document.auxiliary() {
        println!("  {}", set.path());
    }
    println!();

    let t = 1.0;
    for property in ["localRotation.z", "localRotation.w"] {
        let value = clip
            .sample("Armature/Hips/Spine", property, t)
            .expect("spine curve exists");
        println!("Spine {property} at {t}s = {value:.4}");
    }
}
