use std::{fs::File, io::BufWriter, time::Instant};

use sheen::{cli, ppm, render::Renderer, scenes};

fn main() {
    // Parsing cli args
    let cli_args = cli::parse_args();

    env_logger::Builder::new()
        .filter_level(cli_args.verbosity.log_level_filter())
        .init();

    // if no seed is given, debug builds stay deterministic
    let seed = cli_args.seed.unwrap_or({
        if cfg!(debug_assertions) {
            0
        } else {
            rand::random()
        }
    });

    // Get scene
    let (cam, mut scene) = scenes::get_scene(cli_args.scene);

    // Reorganize mesh triangles for accelerated traversal
    if !cli_args.no_bvh {
        for mesh in &mut scene.meshes {
            let build_start = Instant::now();
            mesh.build_bvh(cli_args.bvh_depth);
            let bvh = mesh.bvh().unwrap();
            log::info!(
                "Built BVH with depth {} in {:.2?}: {}",
                cli_args.bvh_depth,
                build_start.elapsed(),
                bvh.stats()
            );
        }
    }

    if let Some(csv_path) = &cli_args.export_bvh {
        for mesh in &scene.meshes {
            let Some(bvh) = mesh.bvh() else {
                log::warn!("--export-bvh given but no BVH was built; skipping");
                continue;
            };
            let result = File::create(csv_path)
                .and_then(|file| bvh.export_csv(BufWriter::new(file)));
            match result {
                Ok(()) => log::info!("BVH node array written to {}", csv_path.display()),
                Err(why) => eprintln!("Failed to write BVH CSV: {why}"),
            }
        }
    }

    let renderer = Renderer::new(
        cli_args.image_width,
        cli_args.image_height,
        cli_args.bounce_depth,
        seed,
    );

    let render_start = Instant::now();
    let frame = renderer.render_scene((cam, &scene));
    log::info!("Frame rendered in {:.2?}", render_start.elapsed());

    // write image to file; .ppm goes through the golden-output writer
    let is_ppm = cli_args
        .output
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));
    let write_result = if is_ppm {
        File::create(&cli_args.output)
            .and_then(|file| ppm::write_ppm(BufWriter::new(file), &frame))
    } else {
        frame
            .to_image()
            .save(&cli_args.output)
            .map_err(|why| std::io::Error::new(std::io::ErrorKind::Other, why))
    };

    match write_result {
        Ok(()) => println!("Image written to {:?}", &cli_args.output),
        Err(why) => {
            eprintln!("Failed to write: {why}");
        }
    }
}
