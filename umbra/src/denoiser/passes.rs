use log::debug;

use crate::BufferDescriptor;

macro_rules! passes {
    ([ $( $name:ident => $class:ident, )* ]) => {
        $( mod $name; )*
        $( pub use self::$name::*; )*

        #[derive(Debug)]
        pub struct DenoiserPasses {
            $( pub $name: $class, )*
        }

        impl DenoiserPasses {
            pub fn new(descriptor: &BufferDescriptor) -> Self {
                debug!("Initializing denoiser passes");

                Self {
                    $( $name: $class::new(descriptor), )*
                }
            }
        }
    };
}

passes!([
    atrous => AtrousPass,
    composition => CompositionPass,
    reprojection => ReprojectionPass,
    surface_packing => SurfacePackingPass,
    variance_estimation => VarianceEstimationPass,
]);
