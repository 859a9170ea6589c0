use super::*;
use rstest::rstest;
use rust_decimal_macros::dec;

#[rstest]
#[case(dec!(10000), dec!(10), dec!(1000))]
#[case(dec!(9000), dec!(10), dec!(900))]
#[case(dec!(0), dec!(11), dec!(0))]
#[case(dec!(250.50), dec!(0), dec!(0))]
#[case(dec!(33.33), dec!(7.5), dec!(2.4998))]
fn test_percent_of(#[case] amount: Decimal, #[case] rate: Decimal, #[case] expected: Decimal) {
    assert_eq!(percent_of(amount, rate), Some(expected));
}

#[test]
fn test_percent_of_overflow() {
    assert_eq!(percent_of(Decimal::MAX, dec!(10)), None);
}

#[rstest]
#[case(dec!(10), true)]
#[case(dec!(1.2345), true)]
#[case(dec!(1.23450000), true)]
#[case(dec!(1.00005), false)]
#[case(dec!(0.00001), false)]
fn test_fits_amount_scale(#[case] value: Decimal, #[case] expected: bool) {
    assert_eq!(fits_amount_scale(value), expected);
}

#[test]
fn test_round_amount_keeps_exact_values() {
    assert_eq!(round_amount(dec!(1234.5678)), dec!(1234.5678));
    assert_eq!(round_amount(dec!(11000)), dec!(11000));
}

#[test]
fn test_bankers_rounding() {
    // Half rounds to the even neighbour at the fourth decimal place.
    assert_eq!(round_amount(dec!(0.00005)), dec!(0.0000));
    assert_eq!(round_amount(dec!(0.00015)), dec!(0.0002));
    assert_eq!(round_amount(dec!(2.49975)), dec!(2.4998));
}
