use bytes::Bytes;
use honggfuzz::fuzz;
use nbtree::{BigEndian, IoInput, LittleEndian, Reader, read_slice};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(root) = read_slice::<BigEndian>(data) {
                let bytes = root.write_to_vec::<BigEndian>().unwrap();
                assert_eq!(read_slice::<BigEndian>(&bytes).unwrap(), root);
                let _ = root.write_to_vec::<LittleEndian>();
            }
            if let Ok(root) = read_slice::<LittleEndian>(data) {
                let _ = root.write_to_vec::<LittleEndian>();
                let _ = root.write_to_vec::<BigEndian>();
            }

            let reader = Reader::default();
            let _ = reader.decode(IoInput::new(data));
            let _ = reader.decode_entries(data);
            let mut bytes = Bytes::copy_from_slice(data);
            let _ = reader.decode(&mut bytes);
        });
    }
}
