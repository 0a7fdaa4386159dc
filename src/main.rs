use std::error::Error;
use std::time::Duration;

use handset::{
    FrameSnapshot, InputEvent, PhoneDimensions, PoseConfig, Renderer, Vec2, Viewer, build_phone,
};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_micros(16_667);

/// Logs pose snapshots instead of drawing them.
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &FrameSnapshot<'_>) {
        self.frames += 1;
        if self.frames % 30 == 0 {
            tracing::info!(
                frame = self.frames,
                mode = ?frame.mode,
                yaw = frame.yaw,
                pitch = frame.pitch,
                distance = frame.camera_distance,
                "pose"
            );
        }
    }
}

fn run_for(viewer: &mut Viewer, renderer: &mut LogRenderer, duration: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < duration {
        viewer.render_frame(FRAME, renderer);
        elapsed += FRAME;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let model = build_phone(&PhoneDimensions::default())?;
    let meshes = model.tessellate();
    let triangles: usize = meshes.iter().map(|m| m.geometry.triangle_count()).sum();
    tracing::info!(parts = meshes.len(), triangles, "phone tessellated");

    let mut viewer = Viewer::new(model, PoseConfig::default());
    let mut renderer = LogRenderer::default();
    viewer.handle(&InputEvent::Resize {
        width: 1280,
        height: 720,
    });

    run_for(&mut viewer, &mut renderer, Duration::from_secs(1));

    // drag a quarter turn to the right and tilt forward
    viewer.handle(&InputEvent::PointerDown(Vec2::new(640.0, 360.0)));
    for step in 1..=30 {
        let t = step as f32 / 30.0;
        viewer.handle(&InputEvent::PointerMove(Vec2::new(640.0 + 314.0 * t, 360.0 + 60.0 * t)));
        viewer.render_frame(FRAME, &mut renderer);
    }
    viewer.handle(&InputEvent::PointerUp);

    viewer.handle(&InputEvent::Wheel(-100.0));
    viewer.select_palette("bronze");
    viewer.select_palette("unobtainium");

    // settle, then auto-rotation picks up again
    run_for(&mut viewer, &mut renderer, Duration::from_secs(5));

    let state = viewer.pose().state();
    tracing::info!(
        frames = renderer.frames,
        yaw = state.current_yaw,
        pitch = state.current_pitch,
        distance = state.camera_distance,
        body = %format!("{:06x}", viewer.model().part_color("body").map_or(0, |c| c.to_hex())),
        "demo finished"
    );
    Ok(())
}
