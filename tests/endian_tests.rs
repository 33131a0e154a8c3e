use nbtree::{
    BigEndian, Endianness, LittleEndian, NativeEndian, Scalar,
    endian::to_stream_order,
};

#[test]
fn test_big_endian_layout() {
    let mut out = Vec::new();
    0x0102_0304i32.write_to::<BigEndian>(&mut out);
    assert_eq!(out, [1, 2, 3, 4]);
    assert_eq!(i32::read_from::<BigEndian>(&out), 0x0102_0304);
}

#[test]
fn test_little_endian_layout() {
    let mut out = Vec::new();
    0x0102u16.write_to::<LittleEndian>(&mut out);
    assert_eq!(out, [2, 1]);
    assert_eq!(u16::read_from::<LittleEndian>(&out), 0x0102);
}

#[test]
fn test_float_layouts() {
    let mut out = Vec::new();
    1.5f32.write_to::<BigEndian>(&mut out);
    assert_eq!(out, 1.5f32.to_be_bytes());

    out.clear();
    (-2.25f64).write_to::<LittleEndian>(&mut out);
    assert_eq!(out, (-2.25f64).to_le_bytes());
    assert_eq!(f64::read_from::<LittleEndian>(&out), -2.25);
}

#[test]
fn test_scalar_sizes() {
    assert_eq!(i8::SIZE, 1);
    assert_eq!(i16::SIZE, 2);
    assert_eq!(u16::SIZE, 2);
    assert_eq!(i32::SIZE, 4);
    assert_eq!(f32::SIZE, 4);
    assert_eq!(i64::SIZE, 8);
    assert_eq!(f64::SIZE, 8);
}

#[test]
fn test_byte_ignores_order() {
    let mut big = Vec::new();
    let mut little = Vec::new();
    (-5i8).write_to::<BigEndian>(&mut big);
    (-5i8).write_to::<LittleEndian>(&mut little);
    assert_eq!(big, little);
    assert_eq!(i8::read_from::<BigEndian>(&big), -5);
}

#[test]
fn test_runtime_endianness() {
    let mut out = Vec::new();
    Endianness::Big.write(0x1122_3344_5566_7788i64, &mut out);
    assert_eq!(out, 0x1122_3344_5566_7788i64.to_be_bytes());
    assert_eq!(Endianness::Big.read::<i64>(&out), 0x1122_3344_5566_7788);
    assert_eq!(
        Endianness::Little.read::<i64>(&out),
        0x1122_3344_5566_7788i64.swap_bytes()
    );
    assert_eq!(Endianness::default(), Endianness::Big);
}

#[test]
fn test_native_endianness() {
    let expected = if cfg!(target_endian = "big") {
        Endianness::Big
    } else {
        Endianness::Little
    };
    assert_eq!(Endianness::native(), expected);
}

#[test]
fn test_to_stream_order() {
    let value = 0x0102_0304i32;
    let swapped = to_stream_order::<BigEndian, _>(value);
    assert_eq!(swapped.to_ne_bytes(), value.to_be_bytes());
    assert_eq!(to_stream_order::<BigEndian, _>(swapped), value);
    assert_eq!(to_stream_order::<NativeEndian, _>(value), value);
}
