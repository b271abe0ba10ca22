mod common;

use common::{assert_close, png_size, APPROX_OFFSET, STD_OFFSET};
use fractal_music::core::fractals::{PolynomialFractal, SquareFractal};
use fractal_music::core::render::{encode_png, plot, plot_traced, Bounds};
use fractal_music::core::{BackTrace, Calculator, ComplexFractal};
use fractal_music::math::{newton, Complex, ComplexPolynomial};
use fractal_music::utils::number::{parse_coefficients, parse_complex, NumberLocale};
use fractal_music::FractalError;

#[test]
fn test_square_and_polynomial_fractals_agree() {
    // w² + c 與多項式 w² + c 的原像相同
    let c = Complex::new(-0.5, 0.25);
    let square = SquareFractal::new(c);
    let polynomial = PolynomialFractal::new(&[Complex::ONE, Complex::ZERO, c]).unwrap();

    let a = Calculator::calculate(&square, Complex::ONE, 4).unwrap();
    let b = Calculator::calculate(&polynomial, Complex::ONE, 4).unwrap();
    assert_eq!(a.len(), 15);
    assert_eq!(b.len(), 15);

    for z in &b {
        assert!(
            a.iter().any(|w| (*w - *z).abs() < APPROX_OFFSET),
            "{} not found among square fractal points",
            z
        );
    }
}

#[test]
fn test_every_point_maps_back_into_the_tree() {
    let fractal = PolynomialFractal::new(&[
        Complex::ONE,
        Complex::ZERO,
        Complex::I,
        Complex::real(1.0),
    ])
    .unwrap();
    let points = Calculator::calculate(&fractal, Complex::new(0.3, -0.2), 5).unwrap();
    assert_eq!(points.len(), 1 + 3 + 9 + 27 + 81);

    let p = fractal.polynomial();
    for z in &points[1..] {
        let image = p.apply(*z);
        assert!(points.iter().any(|w| (*w - image).abs() < APPROX_OFFSET));
    }
}

#[test]
fn test_dimensions_limit_through_trait_object() {
    let fractal: Box<dyn ComplexFractal> = Box::new(SquareFractal::default());
    assert!(Calculator::calculate(fractal.as_ref(), Complex::ONE, 10).is_ok());
    assert!(matches!(
        Calculator::calculate(fractal.as_ref(), Complex::ONE, 11),
        Err(FractalError::LimitExceeded { .. })
    ));
}

#[test]
fn test_rendered_image_dimensions() {
    let points = Calculator::calculate(&SquareFractal::new(Complex::I), Complex::ONE, 10).unwrap();
    let bounds = Bounds::of(&points);
    assert!(bounds.re_min <= 0.0 && bounds.re_max >= 1.0);

    let image = plot(&points, 800).unwrap();
    let bytes = encode_png(&image).unwrap();
    assert_eq!(png_size(&bytes), (image.width(), image.height()));

    let expected = (800.0 / (bounds.span_re() / bounds.span_im())) as u32;
    assert_eq!(image.height(), expected.clamp(1, 6400));
}

#[test]
fn test_backtrace_is_symmetric() {
    let points = BackTrace::new(Some(6), Some(2)).calculate().unwrap();
    let image = plot_traced(&points, 200).unwrap();

    // 第一層的兩個子節點在 ±1，整棵樹左右對稱
    let bounds = Bounds::of(points.iter().map(|p| &p.number));
    assert!((bounds.re_max + bounds.re_min).abs() < STD_OFFSET);
    assert_eq!(image.width(), 200);
}

#[test]
fn test_zeros_of_parsed_polynomial() {
    let de = NumberLocale::from_tag("de_DE");
    // (z - i)² (z + 2) = z³ + (2 - 2i) z² + (-1 - 4i) z - 2
    let coefficients = parse_coefficients("1; 2 - 2i; -1 - 4i; -2", de).unwrap();
    let p = ComplexPolynomial::new(&coefficients);

    let zeros = newton::zeros(&p, None, 1e-20, 1e-4).unwrap();
    assert_eq!(zeros.iter().map(|z| z.multiplicity).sum::<usize>(), 3);

    let double = zeros.iter().find(|z| z.multiplicity == 2).unwrap();
    assert_close(double.value, Complex::I, 1e-4);
    let simple = zeros.iter().find(|z| z.multiplicity == 1).unwrap();
    assert_close(simple.value, Complex::real(-2.0), APPROX_OFFSET);
}

#[test]
fn test_parse_complex_depends_on_locale() {
    let de = NumberLocale::from_tag("de_DE");
    let en = NumberLocale::from_tag("en_GB");

    assert_eq!(
        parse_complex(Some("0,5 + 1,5i"), Complex::ZERO, de),
        Complex::new(0.5, 1.5)
    );
    assert_eq!(
        parse_complex(Some("0.5 + 1.5i"), Complex::ZERO, en),
        Complex::new(0.5, 1.5)
    );
    // 格式不符時退回預設值
    assert_eq!(parse_complex(Some("0.5 + 1.5i"), Complex::I, de), Complex::I);
}
