// qnorm_io
// Copyright (C) 2021  Artois University and CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// Contributors:
//   *   CRIL - initial API and implementation

/// The mean and the (population) variance of a set of samples.
///
/// # Example
///
/// ```
/// # use qnorm_io::Statistics;
/// let stats = Statistics::from_samples(&[1., 2., 3., 4.]);
/// assert_eq!(2.5, stats.mean);
/// assert_eq!(1.25, stats.variance);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Statistics {
    /// The mean of the samples
    pub mean: f64,
    /// The population variance of the samples
    pub variance: f64,
}

impl Statistics {
    /// Computes the statistics of a set of samples.
    ///
    /// Both values are `0` for an empty set.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Statistics::default();
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        Statistics { mean, variance }
    }
}
