use std::num::NonZeroUsize;

use fractal_zoom::{
    AnimationController, FileCheckpointStore, FrameFiles, FrameSize, RunConfig, RunStart,
    decode_archive, load_checkpoint, parse_frame_table,
};

const TABLE: &str = "\
type_fractal;max_iterations;julia_a;julia_b;xmin;xmax;ymin;ymax;r;g;b;opt_next_image;zoom_amount;centering_sigma;centering_up;centering_down;centering_left;centering_right;move_x;move_y
mandelbrot;80;;;-2.0;1.0;-1.2;1.2;3;5;7;zoom centering;0.7;0;1;1;1;1;;
mandelbrot;80;;;;;;;3;5;7;zoom centering;0.7;0;1;1;1;1;;
mandelbrot;90;;;;;;;3;5;7;ZOOM CENTERING MOVE;0.8;0;1;1;1;1;0.0001;0
mandelbrot;90;;;;;;;3;5;7;zoom centering;0.7;0;1;1;1;1;;
mandelbrot;100;;;;;;;3;5;7;zoom centering;0.7;0;1;1;1;1;;
mandelbrot;100;;;;;;;3;5;7;zoom centering;0.7;0;1;1;1;1;;
";

fn config(workers: usize) -> RunConfig {
    RunConfig::new(FrameSize::new(32, 20).unwrap())
        .with_workers(NonZeroUsize::new(workers).unwrap())
}

#[test]
fn test_interrupted_run_resumes_to_identical_frames() {
    let frames = parse_frame_table(TABLE).unwrap();
    assert_eq!(frames.len(), 6);

    let straight_dir = tempfile::tempdir().unwrap();
    let straight_checkpoint = straight_dir.path().join("resume.json");
    let mut straight = AnimationController::new(
        config(4),
        FrameFiles::create(straight_dir.path()).unwrap(),
        FileCheckpointStore::new(&straight_checkpoint),
    )
    .unwrap();
    let expected = straight.run(&frames, RunStart::Fresh).unwrap();
    assert_eq!(expected.frames_rendered, 6);

    let resumed_dir = tempfile::tempdir().unwrap();
    let resumed_checkpoint = resumed_dir.path().join("resume.json");
    let mut first = AnimationController::new(
        config(1),
        FrameFiles::create(resumed_dir.path()).unwrap(),
        FileCheckpointStore::new(&resumed_checkpoint),
    )
    .unwrap();
    let partial = first
        .run_until(&frames, RunStart::Fresh, &|next_frame: usize| next_frame == 3)
        .unwrap();
    assert_eq!(partial.next_frame, 3);

    let checkpoint = load_checkpoint(&resumed_checkpoint).unwrap();
    assert_eq!(checkpoint.next_frame, 3);

    let mut second = AnimationController::new(
        config(3),
        FrameFiles::create(resumed_dir.path()).unwrap(),
        FileCheckpointStore::new(&resumed_checkpoint),
    )
    .unwrap();
    let resumed = second.run(&frames, RunStart::Resume(checkpoint)).unwrap();

    assert_eq!(resumed.next_frame, 6);
    assert_eq!(resumed.final_viewport, expected.final_viewport);
    assert_eq!(
        load_checkpoint(&resumed_checkpoint).unwrap().viewport().unwrap(),
        load_checkpoint(&straight_checkpoint).unwrap().viewport().unwrap()
    );

    let size = FrameSize::new(32, 20).unwrap();
    for number in 1..=6 {
        let name = format!("iterations_{:05}.zip", number);
        let straight_grid = decode_archive(
            std::fs::File::open(straight_dir.path().join(&name)).unwrap(),
            size,
        )
        .unwrap();
        let resumed_grid = decode_archive(
            std::fs::File::open(resumed_dir.path().join(&name)).unwrap(),
            size,
        )
        .unwrap();

        assert_eq!(straight_grid, resumed_grid, "frame {}", number);
    }
}
