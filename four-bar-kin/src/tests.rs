use crate::{syn::*, *};
use approx::assert_abs_diff_eq;
use std::f64::consts::{PI, TAU};

fn dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

fn three_pos() -> Task {
    Task {
        pps: [[0., 0.], [15., 36.], [18., 10.]],
        theta: [0., 200., 281.],
        beta: [250., 190.],
        gamma: [240., 220.],
    }
}

#[test]
fn pllp_example() {
    let fb = FourBar::example();
    assert_eq!(fb.crank_tip(0.), [4., 0.]);
    let [b1, b2] = fb.solve(0.).unwrap();
    assert_abs_diff_eq!(b1[0], 5.916666666666667, epsilon = 1e-12);
    assert_abs_diff_eq!(b1[1], 5.685630034471895, epsilon = 1e-12);
    assert_abs_diff_eq!(b2[0], 5.916666666666667, epsilon = 1e-12);
    assert_abs_diff_eq!(b2[1], -5.685630034471895, epsilon = 1e-12);
}

#[test]
fn pllp_on_both_circles() {
    let cases = [
        ([4., 0.], 6., 7., [10., 0.]),
        ([-3., 2.5], 9., 4., [5., -1.]),
        ([1., 1.], 2., 2., [2., 2.]),
        ([100., -20.], 75.5, 30.25, [40., 10.]),
    ];
    for (a, l2, l3, ob) in cases {
        for b in pllp(a, l2, l3, ob).unwrap() {
            assert_abs_diff_eq!(dist(a, b), l2, epsilon = 1e-9 * l2);
            assert_abs_diff_eq!(dist(ob, b), l3, epsilon = 1e-9 * l3);
        }
    }
}

#[test]
fn pllp_infeasible() {
    // Too far
    assert_eq!(pllp([0., 0.], 6., 7., [13.5, 0.]), Err(Error::Infeasible));
    // Too close
    assert_eq!(pllp([0., 0.], 6., 9., [2., 0.]), Err(Error::Infeasible));
    // Coincident centers
    assert_eq!(pllp([1., 1.], 3., 3., [1., 1.]), Err(Error::Infeasible));
    assert!(Error::Infeasible.is_recoverable());
}

#[test]
fn pllp_tangent() {
    let [b1, b2] = pllp([0., 0.], 6., 7., [13., 0.]).unwrap();
    assert_abs_diff_eq!(dist(b1, b2), 0., epsilon = 1e-12);
    assert_abs_diff_eq!(b1[0], 6., epsilon = 1e-12);
    let [b1, b2] = pllp([0., 0.], 6., 7., [1., 0.]).unwrap();
    assert_abs_diff_eq!(dist(b1, b2), 0., epsilon = 1e-12);
    assert_abs_diff_eq!(b1[0], -6., epsilon = 1e-12);
}

#[test]
fn pllp_invalid_input() {
    assert!(matches!(
        pllp([f64::NAN, 0.], 6., 7., [10., 0.]),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        pllp([4., 0.], -6., 7., [10., 0.]),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        pllp([4., 0.], 6., f64::INFINITY, [10., 0.]),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn pllp_half_chord() {
    assert_eq!(crate::pos::half_chord(5., 3.), Ok(4.));
    assert_eq!(crate::pos::half_chord(5., 5.), Ok(0.));
    // Rounding beyond the tangent point is clamped
    assert_eq!(crate::pos::half_chord(5., 5. + 1e-9), Ok(0.));
    assert_eq!(crate::pos::half_chord(0.5, 0.5 + 1e-10), Ok(0.));
    assert_eq!(crate::pos::half_chord(5., 5.001), Err(Error::NumericalInstability));
    assert!(!Error::NumericalInstability.is_recoverable());
}

#[test]
fn branch_policy() {
    let fb = FourBar::example();
    let [b1, b2] = fb.solve(0.).unwrap();
    let pos = |branch, prev| fb.pos(0., branch, prev).unwrap().b;
    assert_eq!(pos(Branch::PreferFirst, None), b1);
    assert_eq!(pos(Branch::PreferSign(Sign::Plus), None), b1);
    assert_eq!(pos(Branch::PreferSign(Sign::Minus), None), b2);
    assert_eq!(pos(Branch::PreferClosestToPrevious, None), b1);
    assert_eq!(pos(Branch::PreferClosestToPrevious, Some([6., -5.])), b2);
    // The previous position does not affect the fixed policies
    assert_eq!(pos(Branch::PreferFirst, Some([6., -5.])), b1);
    assert_eq!(Branch::default(), Branch::PreferClosestToPrevious);
}

#[test]
fn sweep_skip_infeasible() {
    // Non-Grashof, the crank cannot reach the left side
    let fb = FourBar::example();
    assert!(!fb.link_lengths().is_grashof());
    let sweep = fb.sweep_turn(0., 360, Branch::default()).unwrap();
    assert_eq!(sweep.len(), 360);
    let frames = sweep.collect::<Vec<_>>();
    assert!(frames[0].1.is_ok());
    let (t, pose) = &frames[180];
    assert_abs_diff_eq!(*t, PI, epsilon = 1e-12);
    assert_eq!(*pose, Err(Error::Infeasible));
    let ok = frames.iter().filter(|(_, p)| p.is_ok()).count();
    assert!(ok > 0 && ok < 360);
}

#[test]
fn sweep_continuous() {
    // Grashof crank rocker
    let fb = FourBar::new([0., 0.], [10., 0.], 2., 8., 6.);
    assert_eq!(fb.ty(), FourBarTy::GCRR);
    let curve = fb.curve(360, Branch::PreferClosestToPrevious).unwrap();
    assert_eq!(curve.len(), 360);
    for w in curve.windows(2) {
        assert!(dist(w[0], w[1]) < 0.5);
    }
    // Closing the loop
    assert!(dist(curve[0], curve[359]) < 0.5);
    // Stay on the branch of the first frame
    let mut sweep = fb.sweep(0., TAU, 4, Branch::PreferClosestToPrevious).unwrap();
    let (_, first) = sweep.next().unwrap();
    assert_eq!(sweep.prev(), Some(first.unwrap().b));
}

#[test]
fn sweep_invalid() {
    let fb = FourBar::example();
    assert!(matches!(
        fb.sweep(0., TAU, 0, Branch::PreferFirst),
        Err(Error::InvalidInput(_))
    ));
    let fb = FourBar::new([0., 0.], [10., 0.], -4., 6., 7.);
    assert!(matches!(fb.solve(0.), Err(Error::InvalidInput(_))));
}

#[test]
fn grashof() {
    let lengths = LinkLengths::from([2., 3., 4., 5.]);
    assert!(lengths.is_grashof());
    assert_eq!(lengths.sorted(), [2., 3., 4., 5.]);
    assert_eq!(lengths.ty(), FourBarTy::GCRR);
    let lengths = LinkLengths::from([1., 2., 3., 10.]);
    assert!(!lengths.is_grashof());
    assert_eq!(lengths.ty(), FourBarTy::Invalid);
    assert_eq!(LinkLengths::from([3., 4., 5., 2.]).ty(), FourBarTy::GCCC);
    assert_eq!(LinkLengths::from([4., 2., 5., 3.]).ty(), FourBarTy::GRCR);
    assert_eq!(LinkLengths::from([5., 4., 2., 3.]).ty(), FourBarTy::GRRC);
    assert_eq!(LinkLengths::from([4., 6., 7., 10.]).ty(), FourBarTy::RRR1);
    assert_eq!(LinkLengths::from([f64::NAN, 6., 7., 10.]).ty(), FourBarTy::Invalid);
    assert!(FourBarTy::GCCC.is_grashof() && FourBarTy::GCCC.is_crank_rotatable());
    assert!(!FourBarTy::RRR3.is_grashof());
}

#[test]
fn synthesis() {
    let task = three_pos();
    let ans = task.solve().unwrap();
    assert_abs_diff_eq!(ans.oa[0], 14.223505282647702, epsilon = 1e-9);
    assert_abs_diff_eq!(ans.oa[1], 11.173887494515006, epsilon = 1e-9);
    assert_abs_diff_eq!(ans.ob[0], 12.83449088597871, epsilon = 1e-9);
    assert_abs_diff_eq!(ans.ob[1], 10.016183963484895, epsilon = 1e-9);
    let LinkLengths { l1, l2, l3, l4 } = ans.lengths;
    assert_abs_diff_eq!(l1, 15.260951080338575, epsilon = 1e-9);
    assert_abs_diff_eq!(l2, 18.087671609844808, epsilon = 1e-9);
    assert_abs_diff_eq!(l3, 20.164329104212968, epsilon = 1e-9);
    assert_abs_diff_eq!(l4, 1.8082141631768374, epsilon = 1e-9);
    assert!(ans.grashof);
    assert_eq!(ans.ty(), FourBarTy::GCCC);
    // The moving joints are `p1 - Z`
    let [a, b] = ans.joints();
    assert_abs_diff_eq!(a[0], -ans.za[0], epsilon = 1e-9);
    assert_abs_diff_eq!(a[1], -ans.za[1], epsilon = 1e-9);
    assert_abs_diff_eq!(b[0], -ans.zb[0], epsilon = 1e-9);
    assert_abs_diff_eq!(b[1], -ans.zb[1], epsilon = 1e-9);
}

#[test]
fn synthesis_round_trip() {
    let tasks = [
        three_pos(),
        Task {
            pps: [[1., 2.], [3., 5.], [6., 4.]],
            theta: [10., 40., 75.],
            beta: [30., 70.],
            gamma: [-20., -35.],
        },
    ];
    for task in tasks {
        let ans = task.solve().unwrap();
        assert!(task.residual(&ans) < 1e-9);
        let [a2, a3] = task.alpha().map(f64::to_degrees);
        for (k, (a, b, g)) in [(0., 0., 0.), (a2, task.beta[0], task.gamma[0]), (a3, task.beta[1], task.gamma[1])]
            .into_iter()
            .enumerate()
        {
            for p in ans.reach(a, b, g) {
                assert_abs_diff_eq!(dist(p, task.pps[k]), 0., epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn synthesis_degenerate() {
    // Collinear points with the same coupler angle
    let task = Task {
        pps: [[0., 0.], [1., 1.], [2., 2.]],
        theta: [30., 30., 30.],
        beta: [20., 40.],
        gamma: [-20., -40.],
    };
    assert_eq!(task.solve(), Err(Error::DegenerateSynthesis));
    // Link rotates with the coupler
    let task = Task {
        pps: [[0., 0.], [1., 1.], [2., 2.]],
        theta: [0., 40., 80.],
        beta: [40., 80.],
        gamma: [-20., -40.],
    };
    assert_eq!(task.solve(), Err(Error::DegenerateSynthesis));
}

#[test]
fn synthesis_invalid() {
    let err = Task::from_slices(&[[0., 0.], [1., 1.]], &[0., 1., 2.], &[1., 2.], &[1., 2.]);
    assert_eq!(err, Err(Error::InvalidInput("expect 3 precision points")));
    let err = Task::from_slices(&[[0., 0.]; 3], &[0., 1., 2.], &[1.], &[1., 2.]);
    assert_eq!(err, Err(Error::InvalidInput("expect 2 crank angles")));
    let task = Task { theta: [0., f64::NAN, 1.], ..three_pos() };
    assert!(matches!(task.solve(), Err(Error::InvalidInput(_))));
}

#[test]
fn precision_points() {
    let task = three_pos();
    let pps = task.precision_points();
    assert_eq!(pps[1], PrecisionPoint { p: [15., 36.], theta: 200. });
    assert_eq!(Task::new(pps, task.beta, task.gamma), task);
}

#[test]
fn dyad() {
    use na::Complex;
    let w = Complex::new(3., -1.);
    let z = Complex::new(-0.5, 2.);
    let alpha = [0.3, 0.9];
    let angle = [-0.4, 1.2];
    let delta = std::array::from_fn(|k| {
        w * (Complex::from_polar(1., angle[k]) - 1.) + z * (Complex::from_polar(1., alpha[k]) - 1.)
    });
    let (w1, z1) = solve_dyad(delta, alpha, angle).unwrap();
    assert_abs_diff_eq!((w1 - w).norm(), 0., epsilon = 1e-12);
    assert_abs_diff_eq!((z1 - z).norm(), 0., epsilon = 1e-12);
    assert_eq!(
        solve_dyad(delta, alpha, alpha),
        Err(Error::DegenerateSynthesis)
    );
}

#[test]
#[cfg(feature = "csv")]
fn csv_frames() {
    use crate::csv::{dump_csv, parse_csv, Frame};
    let fb = FourBar::example();
    let frames = fb
        .sweep_turn(0., 36, Branch::default())
        .unwrap()
        .filter_map(|(t, pose)| Some(Frame::new(t, &pose.ok()?)))
        .collect::<Vec<_>>();
    assert!(!frames.is_empty() && frames.len() < 36);
    let s = dump_csv(frames.clone()).unwrap();
    assert!(s.starts_with("angle,ax,ay,bx,by\n"));
    assert_eq!(parse_csv(&s).unwrap(), frames);
    let pose = fb.pos(0., Branch::default(), None).unwrap();
    assert_eq!(frames[0].pose(), pose);
    // Comment lines are skipped
    let frames = parse_csv("# sweep\nangle,ax,ay,bx,by\n90,0,4,6,6.5\n").unwrap();
    assert_eq!(frames[0].pose(), Pose { a: [0., 4.], b: [6., 6.5] });
    assert_abs_diff_eq!(frames[0].angle, 90.);
}

#[test]
#[cfg(feature = "plot")]
fn plot_infeasible_start() {
    use crate::plot::{plot_sweep, SVGBackend};
    let plot = |fb: &FourBar, start: f64| {
        let mut buf = String::new();
        let svg = SVGBackend::with_string(&mut buf, (800, 800));
        plot_sweep(svg, "Linkage", fb, start, 180, Branch::default()).unwrap();
        buf
    };
    // The crank cannot reach the start angle
    let fb = FourBar::example();
    assert_eq!(fb.pos(PI, Branch::default(), None), Err(Error::Infeasible));
    assert!(plot(&fb, PI).contains("<polyline"));
    // Cannot be assembled at any angle
    let fb = FourBar::new([0., 0.], [100., 0.], 1., 1., 1.);
    assert!(fb.curve(180, Branch::default()).unwrap().is_empty());
    assert!(plot(&fb, 0.).starts_with("<svg"));
}
