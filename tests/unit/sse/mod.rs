pub mod test_decoder;
