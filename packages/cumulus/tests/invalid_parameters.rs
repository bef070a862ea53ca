//! Every way of asking for an impossible bucket layout, scale ratio or rescaled view is
//! reported as an invalid parameter, naming the parameter at fault.

use cumulus::{
    BucketLayout, Error, Histogram, ScaleRatio, ScaledHistogram, TimeScaledHistogram, TimeUnit,
};

fn rejected_parameter<T>(result: Result<T, Error>) -> &'static str {
    match result {
        Err(Error::InvalidParameter { parameter, .. }) => parameter,
        Err(other) => panic!("expected an invalid parameter error, got {other}"),
        Ok(_) => panic!("expected an invalid parameter error, got a value"),
    }
}

#[test]
fn linear_layout() {
    assert_eq!(rejected_parameter(BucketLayout::linear(0.0, 0.0, 3)), "width");
    assert_eq!(rejected_parameter(BucketLayout::linear(0.0, -5.0, 3)), "width");
    assert_eq!(rejected_parameter(BucketLayout::linear(0.0, f64::NAN, 3)), "width");
    assert_eq!(rejected_parameter(BucketLayout::linear(f64::NAN, 1.0, 3)), "start");
    assert_eq!(
        rejected_parameter(BucketLayout::linear(f64::INFINITY, 1.0, 3)),
        "start"
    );
    assert_eq!(rejected_parameter(BucketLayout::linear(0.0, 1.0, 0)), "count");
}

#[test]
fn exponential_layout() {
    assert_eq!(rejected_parameter(BucketLayout::exponential(0.0, 2.0, 3)), "start");
    assert_eq!(rejected_parameter(BucketLayout::exponential(-1.0, 2.0, 3)), "start");
    assert_eq!(rejected_parameter(BucketLayout::exponential(1.0, 1.0, 3)), "factor");
    assert_eq!(rejected_parameter(BucketLayout::exponential(1.0, 0.5, 3)), "factor");
    assert_eq!(rejected_parameter(BucketLayout::exponential(1.0, 2.0, 0)), "count");
}

#[test]
fn custom_layout() {
    assert_eq!(
        rejected_parameter(BucketLayout::custom(Vec::<f64>::new())),
        "boundaries"
    );
    assert_eq!(rejected_parameter(BucketLayout::custom([2.0, 1.0])), "boundaries");
    assert_eq!(rejected_parameter(BucketLayout::custom([1.0, 1.0])), "boundaries");
    assert_eq!(
        rejected_parameter(BucketLayout::custom([1.0, f64::INFINITY])),
        "boundaries"
    );
}

#[test]
fn scale_ratio() {
    assert_eq!(rejected_parameter(ScaleRatio::new(0, 1000)), "numerator");
    assert_eq!(rejected_parameter(ScaleRatio::new(1, 0)), "denominator");
}

#[test]
fn rescaled_view() {
    let huge = ScaledHistogram::new(Histogram::new(
        BucketLayout::custom([1e300, 1e306]).unwrap(),
    ));
    assert_eq!(
        rejected_parameter(huge.shift_scale(ScaleRatio::new(1000, 1).unwrap())),
        "ratio"
    );

    let days = TimeScaledHistogram::new(
        Histogram::new(BucketLayout::custom([1e300]).unwrap()),
        TimeUnit::Days,
    );
    assert_eq!(
        rejected_parameter(days.shift_scale(TimeUnit::Nanoseconds)),
        "ratio"
    );
}

#[test]
fn error_message_names_the_parameter_and_value() {
    let error = BucketLayout::linear(0.0, -5.0, 3).unwrap_err();
    let message = error.to_string();

    assert!(message.contains("width"), "{message}");
    assert!(message.contains("-5"), "{message}");
}
