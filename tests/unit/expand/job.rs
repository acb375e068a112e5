use super::*;
use crate::raster::image::PixelFormat;
use crate::raster::mask::MASK_VALID;

fn inputs(w: u32, h: u32) -> (Arc<ImageF32>, Arc<Mask>) {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[x as f32, y as f32, 0.0, 1.0]);
        }
    }
    let image = ImageF32::from_raw(w, h, PixelFormat::RgbaF32, data).unwrap();
    let mut mask = Mask::new_filled(w, h, 0).unwrap();
    mask.set(w / 2, h / 2, MASK_VALID);
    (Arc::new(image), Arc::new(mask))
}

#[test]
fn job_reports_progress_and_returns_filled_image() {
    let (image, mask) = inputs(16, 96);
    let job = ExpandJob::spawn(
        image.clone(),
        mask.clone(),
        (*image).clone(),
        ExpandOpts::default(),
    )
    .unwrap();

    let mut progress = Vec::new();
    let mut finished = None;
    while let Some(ev) = job.wait_event() {
        match ev {
            ExpandEvent::Progress(p) => progress.push(p),
            ExpandEvent::Finished(status) => {
                finished = Some(status);
                break;
            }
        }
    }
    assert_eq!(finished, Some(ExpandStatus::Completed));
    assert_eq!(progress.last().copied(), Some(1.0));
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));

    let (out, report) = job.join().unwrap();
    assert_eq!(report.status, ExpandStatus::Completed);
    assert_eq!(report.rows_completed, 96);
    assert_eq!(&out.pixel(0, 0)[..2], &[8.0, 48.0]);
    assert_eq!(&out.pixel(15, 95)[..2], &[8.0, 48.0]);
}

#[test]
fn polling_progress_keeps_the_finish_event() {
    let (image, mask) = inputs(8, 40);
    let job = ExpandJob::spawn(
        image.clone(),
        mask,
        (*image).clone(),
        ExpandOpts {
            block_rows: 8,
            ..ExpandOpts::default()
        },
    )
    .unwrap();
    while !job.is_finished() {
        std::thread::yield_now();
    }

    assert_eq!(job.latest_progress(), Some(1.0));
    assert_eq!(job.latest_progress(), None);
    assert_eq!(
        job.try_event(),
        Some(ExpandEvent::Finished(ExpandStatus::Completed))
    );
    assert_eq!(job.try_event(), None);
    assert_eq!(job.join().unwrap().1.status, ExpandStatus::Completed);
}

#[test]
fn cancelled_job_still_returns_its_output() {
    let (image, mask) = inputs(8, 64);
    let seed = (*image).clone();
    let job = ExpandJob::spawn(
        image,
        mask,
        seed,
        ExpandOpts {
            parallel: false,
            block_rows: 1,
            ..ExpandOpts::default()
        },
    )
    .unwrap();
    job.cancel();
    assert!(job.cancel_token().is_cancelled());

    let (out, report) = job.join().unwrap();
    assert_eq!(out.dimensions(), (8, 64));
    assert!(report.rows_completed <= report.rows_total);
    if report.status == ExpandStatus::Cancelled {
        assert!(report.rows_completed < 64);
    }
}

#[test]
fn invalid_inputs_surface_through_join() {
    let (image, _) = inputs(4, 4);
    let mask = Arc::new(Mask::new_filled(3, 4, MASK_VALID).unwrap());
    let job = ExpandJob::spawn(image.clone(), mask, (*image).clone(), ExpandOpts::default())
        .unwrap();
    assert!(matches!(
        job.join(),
        Err(TexpandError::DimensionMismatch { .. })
    ));
}
