use burn::{
    backend::{Autodiff, NdArray},
    module::{Module, Param},
    nn::{Linear, LinearConfig},
    optim::{AdamConfig, GradientsParams, Optimizer},
    tensor::{activation, backend::Backend, ElementConversion, Tensor, TensorData},
};
use log::{debug, warn};
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::error::ClassifierError;
use super::utils::softmax_in_place;
use crate::config::TrainingConfig;

type TrainBackend = Autodiff<NdArray<f32>>;

const ADAM_BETA1: f32 = 0.9;
const ADAM_BETA2: f32 = 0.999;
const ADAM_EPSILON: f32 = 1e-8;

/// Outcome of fitting a network.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    /// Epochs actually run
    pub iterations: usize,
    /// Regularised loss of the last epoch
    pub final_loss: f32,
    /// `false` when training stopped at `max_iter`
    pub converged: bool,
}

/// ReLU stack of linear layers; the last layer emits logits.
#[derive(Module, Debug)]
struct Mlp<B: Backend> {
    layers: Vec<Linear<B>>,
}

impl<B: Backend> Mlp<B> {
    /// Glorot-uniform initialisation drawn from a seeded ChaCha20 stream, so
    /// the same seed always gives the same starting weights.
    fn new(sizes: &[usize], intercept: bool, rng: &mut ChaCha20Rng, device: &B::Device) -> Self {
        let layers = sizes
            .windows(2)
            .map(|pair| {
                let (fan_in, fan_out) = (pair[0], pair[1]);
                let bound = (6.0 / (fan_in + fan_out) as f32).sqrt();
                let weights: Vec<f32> = (0..fan_in * fan_out)
                    .map(|_| rng.gen_range(-bound..bound))
                    .collect();

                let mut linear = LinearConfig::new(fan_in, fan_out)
                    .with_bias(intercept)
                    .init(device);
                linear.weight = Param::from_tensor(Tensor::from_data(
                    TensorData::new(weights, [fan_in, fan_out]),
                    device,
                ));
                if intercept {
                    let bias: Vec<f32> = (0..fan_out).map(|_| rng.gen_range(-bound..bound)).collect();
                    linear.bias = Some(Param::from_tensor(Tensor::from_data(
                        TensorData::new(bias, [fan_out]),
                        device,
                    )));
                }
                linear
            })
            .collect();
        Self { layers }
    }

    /// x: [batch, features] -> logits [batch, classes]
    fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let last = self.layers.len() - 1;
        self.layers.iter().enumerate().fold(x, |h, (i, layer)| {
            let z = layer.forward(h);
            if i < last {
                activation::relu(z)
            } else {
                z
            }
        })
    }

    /// Sum of squared weights over every layer (biases excluded).
    fn weight_penalty(&self, device: &B::Device) -> Tensor<B, 1> {
        self.layers
            .iter()
            .fold(Tensor::zeros([1], device), |acc, layer| {
                let w = layer.weight.val();
                acc + (w.clone() * w).sum()
            })
    }
}

/// Frozen weights of one trained layer.
#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Array2<f32>,
    bias: Option<Array1<f32>>,
}

/// A trained multilayer perceptron with ReLU hidden layers and a softmax output.
///
/// Training runs on burn's autodiff backend; the fitted weights are then
/// frozen into plain matrices, so a trained network is immutable and can be
/// shared freely between threads.
#[derive(Debug, Clone)]
pub(crate) struct FeedForwardNetwork {
    layers: Vec<DenseLayer>,
}

impl FeedForwardNetwork {
    /// Trains a network mapping `features` rows to `targets` class indices
    /// with full-batch Adam on L2-regularised cross-entropy.
    ///
    /// Training stops after `max_iter` epochs or once the loss has failed to
    /// improve on its best value by more than `tol` for more than
    /// `n_iter_no_change` consecutive epochs.
    pub(crate) fn fit(
        features: &Array2<f32>,
        targets: &[usize],
        n_classes: usize,
        config: &TrainingConfig,
    ) -> Result<(Self, TrainingSummary), ClassifierError> {
        config.validate()?;
        let n_samples = features.nrows();
        if n_samples == 0 || n_samples != targets.len() {
            return Err(ClassifierError::BuildError(format!(
                "Expected one target per sample, got {} samples and {} targets",
                n_samples,
                targets.len()
            )));
        }
        if let Some(&bad) = targets.iter().find(|&&t| t >= n_classes) {
            return Err(ClassifierError::BuildError(format!(
                "Target class {} out of range for {} classes",
                bad, n_classes
            )));
        }

        let device = <TrainBackend as Backend>::Device::default();
        let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
        let mut sizes = vec![features.ncols()];
        sizes.extend(&config.hidden_layers);
        sizes.push(n_classes);
        let mut model = Mlp::<TrainBackend>::new(&sizes, config.intercept, &mut rng, &device);

        let x = Tensor::<TrainBackend, 2>::from_data(
            TensorData::new(features.iter().copied().collect::<Vec<f32>>(), [n_samples, features.ncols()]),
            &device,
        );
        let mut one_hot = vec![0.0f32; n_samples * n_classes];
        for (row, &target) in targets.iter().enumerate() {
            one_hot[row * n_classes + target] = 1.0;
        }
        let y = Tensor::<TrainBackend, 2>::from_data(
            TensorData::new(one_hot, [n_samples, n_classes]),
            &device,
        );

        let mut opt = AdamConfig::new()
            .with_beta_1(ADAM_BETA1)
            .with_beta_2(ADAM_BETA2)
            .with_epsilon(ADAM_EPSILON)
            .init::<TrainBackend, Mlp<TrainBackend>>();

        let n = n_samples as f32;
        let mut best_loss = f32::INFINITY;
        let mut no_improvement = 0;
        let mut summary = TrainingSummary {
            iterations: 0,
            final_loss: f32::INFINITY,
            converged: false,
        };

        for epoch in 1..=config.max_iter {
            let logits = model.forward(x.clone());
            let data_loss = (activation::log_softmax(logits, 1) * y.clone())
                .sum()
                .mul_scalar(-1.0 / n);
            let penalty = model
                .weight_penalty(&device)
                .mul_scalar(config.alpha / (2.0 * n));
            let loss = data_loss + penalty;
            let loss_value: f32 = loss.clone().into_scalar().elem();

            // Backprop → grads → map to module params → step with LR
            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = opt.step(config.learning_rate as f64, model, grads);

            summary.iterations = epoch;
            summary.final_loss = loss_value;
            if epoch % 100 == 0 {
                debug!("Epoch {}: loss {:.6}", epoch, loss_value);
            }

            if loss_value > best_loss - config.tol {
                no_improvement += 1;
            } else {
                no_improvement = 0;
            }
            if loss_value < best_loss {
                best_loss = loss_value;
            }
            if no_improvement > config.n_iter_no_change {
                summary.converged = true;
                debug!(
                    "Loss did not improve more than {} for {} consecutive epochs, stopping at epoch {}",
                    config.tol, config.n_iter_no_change, epoch
                );
                break;
            }
        }

        if !summary.converged {
            warn!(
                "Training reached max_iter ({}) without converging, final loss {:.6}",
                config.max_iter, summary.final_loss
            );
        }

        Ok((Self::freeze(&model)?, summary))
    }

    /// Copies the trained parameters out of the autodiff graph.
    fn freeze(model: &Mlp<TrainBackend>) -> Result<Self, ClassifierError> {
        let layers = model
            .layers
            .iter()
            .map(|linear| {
                let [fan_in, fan_out] = linear.weight.val().dims();
                let weights = Array2::from_shape_vec((fan_in, fan_out), tensor_values(linear.weight.val())?)
                    .map_err(|e| ClassifierError::BuildError(format!("Bad weight shape: {}", e)))?;
                let bias = match &linear.bias {
                    Some(bias) => Some(Array1::from_vec(tensor_values(bias.val())?)),
                    None => None,
                };
                Ok(DenseLayer { weights, bias })
            })
            .collect::<Result<Vec<_>, ClassifierError>>()?;
        Ok(Self { layers })
    }

    pub(crate) fn hidden_layers(&self) -> Vec<usize> {
        self.layers[..self.layers.len() - 1]
            .iter()
            .map(|layer| layer.weights.ncols())
            .collect()
    }

    /// Class probabilities for a single feature vector.
    pub(crate) fn predict_proba(&self, features: &Array1<f32>) -> Array1<f32> {
        let mut h = features.view().insert_axis(Axis(0)).to_owned();
        for (i, layer) in self.layers.iter().enumerate() {
            h = h.dot(&layer.weights);
            if let Some(bias) = &layer.bias {
                h += bias;
            }
            if i + 1 < self.layers.len() {
                h.mapv_inplace(|v| v.max(0.0));
            }
        }
        let mut output = h.index_axis_move(Axis(0), 0);
        softmax_in_place(output.view_mut());
        output
    }
}

fn tensor_values<const D: usize>(tensor: Tensor<TrainBackend, D>) -> Result<Vec<f32>, ClassifierError> {
    tensor
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| ClassifierError::BuildError(format!("Cannot read trained weights: {:?}", e)))
}
