pub mod device;
pub mod pairing;
