use reflectivity::{
    Resolution, Scaling, Slab, Tile, convolve, discretize, extend_wave_vector, extension_lengths,
    reflectivity_profile, slab_for_material, specular_reflectivity,
};

const WAVELENGTH: f64 = 4.25;

fn slab(sld: f64, thickness: f64, width: f64) -> Slab {
    Slab::new(Tile::new(sld, 0.0, 0.0, thickness), width)
}

/// Air / Ni (551 Å) / Si, with the Ni/Si interface roughened.
fn nickel_film() -> Vec<Slab> {
    vec![
        slab(0.0, 0.0, 0.0),
        slab(9.31e-6, 551.0, 4.3 * 2.35),
        slab(2.070e-6, 0.0, 0.0),
    ]
}

fn grid(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * step).collect()
}

#[test]
fn test_single_tile_never_reflects() {
    let tiles = [Tile::new(9.31e-6, 1e-8, 1e-7, 100.0)];
    for wavelength in [0.5, 1.8, 4.25, 12.0] {
        for q in grid(0.0, 0.01, 30) {
            assert_eq!(specular_reflectivity(q, wavelength, &tiles), 0.0);
        }
    }
}

#[test]
fn test_non_positive_wavelength_never_reflects() {
    let tiles = discretize(&nickel_film(), 41).tiles;
    for q in [0.005, 0.01, 0.03, 0.1] {
        assert_eq!(specular_reflectivity(q, 0.0, &tiles), 0.0);
        assert_eq!(specular_reflectivity(q, -4.25, &tiles), 0.0);
    }
}

#[test]
fn test_total_external_reflection_limit() {
    let tiles = [Tile::new(0.0, 0.0, 0.0, 0.0), Tile::new(2.07e-6, 0.0, 0.0, 0.0)];
    for q in [1e-3, 1e-4, 1e-6, 1e-8] {
        let r = specular_reflectivity(q, WAVELENGTH, &tiles);
        assert!((r - 1.0).abs() < 1e-9, "R({q}) = {r}");
    }
}

#[test]
fn test_nickel_critical_edge() {
    let tiles = discretize(&nickel_film(), 41).tiles;

    let below = specular_reflectivity(0.01, WAVELENGTH, &tiles);
    assert!(below > 0.99, "R below the Ni edge = {below}");

    let above = specular_reflectivity(0.03, WAVELENGTH, &tiles);
    assert!(above < 0.5, "R above the Ni edge = {above}");
    assert!(above > 1e-5, "R above the Ni edge = {above}");
}

#[test]
fn test_nickel_critical_edge_with_resolution() {
    let q = grid(0.005, 0.0005, 91);
    let res = Resolution::new(0.0, 0.02);
    let out = reflectivity_profile(&nickel_film(), 41, &res, WAVELENGTH, &q, Scaling::Reflectivity)
        .unwrap();

    let at = |target: f64| {
        let idx = q
            .iter()
            .position(|&v| (v - target).abs() < 1e-9)
            .expect("grid point");
        out.reflectivity[idx]
    };
    assert!(at(0.01) > 0.99, "R(0.01) = {}", at(0.01));
    assert!(at(0.03) < 0.5, "R(0.03) = {}", at(0.03));
}

#[test]
fn test_roughness_converges_to_sharp_interfaces() {
    let sharp_slabs = vec![
        slab(0.0, 0.0, 0.0),
        slab(6.0e-6, 150.0, 0.0),
        slab(3.5e-6, 80.0, 0.0),
        slab(2.07e-6, 0.0, 0.0),
    ];
    let sharp_tiles: Vec<Tile> = sharp_slabs.iter().map(|s| s.tile).collect();
    let qs = grid(0.012, 0.004, 35);

    let max_rel_error = |width: f64| {
        let rough: Vec<Slab> = sharp_slabs
            .iter()
            .map(|s| Slab::new(s.tile, width))
            .collect();
        let tiles = discretize(&rough, 41).tiles;
        qs.iter()
            .map(|&q| {
                let a = specular_reflectivity(q, WAVELENGTH, &tiles);
                let b = specular_reflectivity(q, WAVELENGTH, &sharp_tiles);
                (a - b).abs() / b
            })
            .fold(0.0_f64, f64::max)
    };

    let coarse = max_rel_error(2.0);
    let fine = max_rel_error(0.001);
    assert!(fine < 1e-5, "relative error at σ = 0.001 Å: {fine}");
    assert!(coarse > fine, "coarse = {coarse}, fine = {fine}");

    // σ = 0 reproduces the slab stack exactly
    let tiles = discretize(&sharp_slabs, 41).tiles;
    for &q in &qs {
        let a = specular_reflectivity(q, WAVELENGTH, &tiles);
        let b = specular_reflectivity(q, WAVELENGTH, &sharp_tiles);
        assert!((a - b).abs() <= 1e-12 * b.max(1e-12), "q = {q}: {a} vs {b}");
    }
}

#[test]
fn test_roughness_lowers_high_q_reflectivity() {
    let smooth = discretize(&[slab(0.0, 0.0, 0.0), slab(2.07e-6, 0.0, 0.0)], 41).tiles;
    let rough = discretize(&[slab(0.0, 0.0, 8.0), slab(2.07e-6, 0.0, 0.0)], 41).tiles;
    for q in [0.05, 0.08, 0.12] {
        let rs = specular_reflectivity(q, WAVELENGTH, &smooth);
        let rr = specular_reflectivity(q, WAVELENGTH, &rough);
        assert!(rr < rs, "q = {q}: rough {rr} vs smooth {rs}");
    }
}

#[test]
fn test_flat_curve_survives_convolution() {
    let q = grid(0.01, 0.0007, 80);
    for res in [
        Resolution::new(0.0, 0.0),
        Resolution::new(0.003, 0.0),
        Resolution::new(0.0, 0.1),
        Resolution::new(0.02, 0.05),
    ] {
        let (low, high) = extension_lengths(&q, &res);
        let extended = extend_wave_vector(&q, low, high);
        let flat = vec![0.25; extended.len()];
        let out = convolve(&extended, &flat, &res, low, q.len()).unwrap();
        assert_eq!(out.len(), q.len());
        assert!(out.iter().all(|v| (v - 0.25).abs() < 1e-12));
    }
}

#[test]
fn test_extensions_grow_with_resolution() {
    let q = grid(0.02, 0.001, 150);
    let widths = [0.0, 1e-4, 5e-4, 1e-3, 3e-3, 1e-2];
    for pair in widths.windows(2) {
        let narrow = extension_lengths(&q, &Resolution::new(pair[0], 0.01));
        let wide = extension_lengths(&q, &Resolution::new(pair[1], 0.01));
        assert!(wide.0 >= narrow.0 && wide.1 >= narrow.1);

        let narrow = extension_lengths(&q, &Resolution::new(5e-4, pair[0]));
        let wide = extension_lengths(&q, &Resolution::new(5e-4, pair[1]));
        assert!(wide.0 >= narrow.0 && wide.1 >= narrow.1);
    }
}

#[test]
fn test_output_length_matches_request() {
    let stack = nickel_film();
    for (n, res) in [
        (1, Resolution::new(0.001, 0.0)),
        (2, Resolution::new(0.05, 0.0)),
        (10, Resolution::new(0.0, 0.5)),
        (200, Resolution::new(0.002, 0.03)),
    ] {
        let q = grid(0.008, 0.0004, n);
        let out =
            reflectivity_profile(&stack, 41, &res, WAVELENGTH, &q, Scaling::Rq4).unwrap();
        assert_eq!(out.reflectivity.len(), n);
        assert_eq!(out.wave_vector.len(), n);
        assert!(out.reflectivity.iter().all(|r| r.is_finite()));
    }
}

#[test]
fn test_wide_resolution_on_short_extension() {
    // Extensions sized for a narrow kernel, convolved with a very wide one:
    // the walk has to stop at the array ends.
    let q = grid(0.01, 0.001, 12);
    let narrow = Resolution::new(0.0005, 0.0);
    let (low, high) = extension_lengths(&q, &narrow);
    let extended = extend_wave_vector(&q, low, high);
    let tiles = discretize(&nickel_film(), 11).tiles;
    let raw: Vec<f64> = extended
        .iter()
        .map(|&x| specular_reflectivity(x, WAVELENGTH, &tiles))
        .collect();

    let wide = Resolution::new(10.0, 1.0);
    let out = convolve(&extended, &raw, &wide, low, q.len()).unwrap();
    assert_eq!(out.len(), q.len());
    let lo = raw.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = raw.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    for v in out {
        assert!(v >= lo - 1e-12 && v <= hi + 1e-12, "{v} outside [{lo}, {hi}]");
    }
}

#[test]
fn test_profile_from_materials() {
    let slabs = vec![
        slab_for_material("air", 0.0, 3.0).unwrap(),
        slab_for_material("nickel", 551.0, 10.0).unwrap(),
        slab_for_material("silicon", 0.0, 0.0).unwrap(),
    ];
    let q = grid(0.005, 0.001, 50);
    let out = reflectivity_profile(
        &slabs,
        41,
        &Resolution::new(0.0005, 0.02),
        WAVELENGTH,
        &q,
        Scaling::Reflectivity,
    )
    .unwrap();

    let depth = &out.profile.depth;
    assert!(depth.windows(2).all(|w| w[1] >= w[0]));
    let density = &out.profile.scattering_density;
    assert_eq!(density.first().copied(), Some(0.0));
    let max = density.iter().cloned().fold(0.0_f64, f64::max);
    assert!((max - 9.408e-6).abs() < 1e-9);
}

/// Air / Ni / Si with the given incident-medium and substrate thicknesses.
fn nickel_film_with_media(top: Tile, substrate_thickness: f64) -> Vec<Slab> {
    vec![
        Slab::new(top, 0.0),
        slab(9.31e-6, 551.0, 4.3 * 2.35),
        slab(2.070e-6, substrate_thickness, 0.0),
    ]
}

#[test]
fn test_nickel_critical_edge_with_semi_infinite_media() {
    let slabs = nickel_film_with_media(Tile::new(0.0, 0.0, 0.0, f64::INFINITY), f64::INFINITY);
    let tiles = discretize(&slabs, 41).tiles;

    let below = specular_reflectivity(0.01, WAVELENGTH, &tiles);
    assert!(below > 0.99, "R below the Ni edge = {below}");
    let above = specular_reflectivity(0.03, WAVELENGTH, &tiles);
    assert!(above > 1e-5 && above < 0.5, "R above the Ni edge = {above}");

    let q = grid(0.005, 0.0005, 91);
    let out = reflectivity_profile(
        &slabs,
        41,
        &Resolution::new(0.0005, 0.02),
        WAVELENGTH,
        &q,
        Scaling::Reflectivity,
    )
    .unwrap();
    assert!(out.reflectivity.iter().all(|r| r.is_finite()));
    assert!(out.profile.depth.iter().all(|z| z.is_finite()));
}

#[test]
fn test_outer_media_thickness_is_ignored() {
    let q = grid(0.005, 0.0007, 120);
    let res = Resolution::new(0.0005, 0.02);
    // transparent air, and an absorbing top medium with contrast to the film
    for top in [Tile::new(0.0, 0.0, 0.0, 0.0), Tile::new(1.0e-6, 1e-7, 0.0, 0.0)] {
        let reference = reflectivity_profile(
            &nickel_film_with_media(top, 0.0),
            41,
            &res,
            WAVELENGTH,
            &q,
            Scaling::Reflectivity,
        )
        .unwrap();

        for d in [1e4, f64::INFINITY] {
            let out = reflectivity_profile(
                &nickel_film_with_media(top.with_thickness(d), d),
                41,
                &res,
                WAVELENGTH,
                &q,
                Scaling::Reflectivity,
            )
            .unwrap();
            assert_eq!(out.reflectivity, reference.reflectivity, "thickness {d}");
            assert_eq!(out.profile, reference.profile, "thickness {d}");
            assert!(out.reflectivity.iter().all(|r| r.is_finite()));
        }
    }
}
