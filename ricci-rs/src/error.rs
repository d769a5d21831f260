use ricci_error::Error as ExprError;
use ricci_tensor::TensorError;
use std::io;

/// Utility enum to package errors that can occur while parsing arguments / computing the tensor.
#[derive(Debug)]
pub enum Error {
    /// An expression given on the command line could not be parsed.
    Expr {
        /// The flag the expression was given to.
        flag: &'static str,

        /// The expression as given.
        input: String,

        /// The error, with spans into `input`.
        error: ExprError,
    },

    /// An error that occurred while computing the tensor.
    Tensor(TensorError),

    /// The results could not be written.
    Io(io::Error),
}

impl Error {
    /// Report the error to stderr.
    ///
    /// Expression errors are rendered with `ariadne`, highlighting the offending part of the
    /// argument.
    pub fn report_to_stderr(&self) {
        match self {
            Self::Expr { flag, input, error } => {
                if let Err(err) = error.report_to_stderr(flag, input) {
                    eprintln!("error: could not write report: {}", err);
                }
            },
            Self::Tensor(err) => eprintln!("error: {}", err),
            Self::Io(err) => eprintln!("error: could not write results: {}", err),
        }
    }
}

impl From<TensorError> for Error {
    fn from(err: TensorError) -> Self {
        Self::Tensor(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
