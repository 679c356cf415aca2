// NOTE: changes the working directory of the whole test binary, so it lives in its own
// file
mod common;

use std::{env, path::Path};

use common::{file_names, scratch_dir, write_file};
use shotconv::{
    dispatch::{self, Mode},
    Options,
};

#[test]
fn test_keyframes_in_current_dir_twice() -> shotconv::Result<()> {
    let tmp = scratch_dir();
    write_file(tmp.path(), "a_start_24.jpg", "a");
    env::set_current_dir(tmp.path()).expect("could not change dir");

    for _ in 0..2 {
        let summary = dispatch::process_path(
            Path::new("."),
            Mode::Keyframes,
            false,
            &Options::default(),
        )?;
        assert_eq!(1, summary.keyframes.copied);
    }

    let out = tmp.path().join("keyframes_converted");
    assert_eq!(vec!["a_start_00_00_01.000.jpg"], file_names(&out));
    assert!(!out.join("keyframes_converted").exists());
    Ok(())
}
