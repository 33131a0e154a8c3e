use bytes::Bytes;
use nbtree::{
    BigEndian, Endianness, IoInput, LittleEndian, ReadConfig, Reader, TextPolicy, read_slice,
};

#[macro_use]
extern crate afl;
extern crate nbtree;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(root) = read_slice::<BigEndian>(data) {
            let bytes = root.write_to_vec::<BigEndian>().unwrap();
            assert_eq!(read_slice::<BigEndian>(&bytes).unwrap(), root);
            let _ = root.write_to_vec::<LittleEndian>();
        }
        if let Ok(root) = read_slice::<LittleEndian>(data) {
            let bytes = root.write_to_vec::<LittleEndian>().unwrap();
            assert_eq!(read_slice::<LittleEndian>(&bytes).unwrap(), root);
        }

        let lossy = Reader::new(
            ReadConfig::default()
                .with_byte_order(Endianness::Little)
                .with_text(TextPolicy::Lossy),
        );
        let _ = lossy.decode(IoInput::new(data));
        let _ = lossy.decode_entries(data);

        let mut bytes = Bytes::copy_from_slice(data);
        let _ = Reader::default().decode(&mut bytes);
    });
}
