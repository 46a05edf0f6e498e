/// Named getters and setters over the fixed gene array of a concrete genome.
#[macro_export]
macro_rules! gene_accessors {
    ($t:ty { $($name:ident: $idx:expr),+ $(,)? }) => {
        impl $t {
            $(
                #[inline]
                pub fn $name(&self) -> f64 {
                    self.genes[$idx]
                }

                ::paste::paste! {
                    #[inline]
                    pub fn [<set_ $name>](&mut self, value: f64) {
                        self.genes[$idx] = value;
                    }
                }
            )+
        }
    };
}

#[macro_export]
macro_rules! test_t {
  ( #[should_panic(expected = $panic_msg:literal)]
    $name:ident[T: $($impl:ty)|*]() $body:tt ) => {$(
      ::paste::paste! {
          #[test]
          #[should_panic(expected = $panic_msg)]
          fn [<$name _ $impl:snake>]() {
            type T=$impl;
            $body
          }
      }
  )+};
  ($name:ident[T: $($impl:ty)|*]() $body:tt ) => {$(
      ::paste::paste! {
          #[test]
          fn [<test_ $name _ $impl:snake>]() {
            type T=$impl;
            $body
          }
      }
  )+};
}

#[macro_export]
macro_rules! assert_f64_approx {
    ($l:expr, $r:expr) => {
        assert!(
            ($l - $r).abs() < 1e-9,
            "assertion failed: {} !~ {}",
            $l,
            $r
        )
    };
    ($l:expr, $r:expr, $msg:expr) => {
        assert!(
            ($l - $r).abs() < 1e-9,
            "assertion failed: {} !~ {}: {}",
            $l,
            $r,
            $msg
        )
    };
}
